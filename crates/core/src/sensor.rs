// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sensor reconciliation.
//!
//! Folds an external occupancy reading into a slot's current status.
//! The precedence policy: sensor occupancy may only promote `booked` or
//! `free` to `occupied`, and may only demote `occupied` back to `free`.
//! Maintenance holds are never touched by sensors.

use parkd_domain::SlotStatus;

/// The transition (if any) a sensor reading calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorAction {
    /// The slot is already in the reported state, or the reading is not
    /// allowed to change it (maintenance hold).
    Ignore,
    /// A vehicle arrived: transition to `occupied`.
    MarkOccupied,
    /// A vehicle left: complete the slot's entered booking (creating the
    /// charge), then transition to `free`. Billing happens before the
    /// transition is considered finished.
    VehicleExit,
}

/// Decides what a single occupancy reading means for a slot.
#[must_use]
pub const fn reconcile_reading(current: SlotStatus, occupied: bool) -> SensorAction {
    match (current, occupied) {
        (SlotStatus::Booked | SlotStatus::Free, true) => SensorAction::MarkOccupied,
        (SlotStatus::Occupied, false) => SensorAction::VehicleExit,
        _ => SensorAction::Ignore,
    }
}
