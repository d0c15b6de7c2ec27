// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_core::{SensorAction, reconcile_reading};
use parkd_domain::{Booking, Payment, Slot, SlotStatus};
use time::OffsetDateTime;

use crate::error::PersistenceError;
use crate::mutations::booking::complete_exit;
use crate::mutations::slot::set_slot_status;
use crate::queries;

/// What a single sensor reading ended up doing.
#[derive(Debug, Clone)]
pub enum SensorOutcome {
    /// The reading matched the stored state (or hit a maintenance hold).
    Ignored,
    /// The slot was marked `occupied`.
    Occupied,
    /// A vehicle exit completed a booking and created its charge.
    Exit {
        /// The completed booking.
        booking: Booking,
        /// The pending charge created for it.
        payment: Payment,
    },
    /// A vehicle exit with no entered booking; the slot was freed and
    /// the anomaly WARN-logged.
    ExitUnmatched,
}

/// Folds one occupancy reading into the store.
///
/// The billing and the slot transition of a vehicle exit commit
/// together; inner transactions become savepoints.
///
/// # Errors
///
/// Returns `SlotNotFound` for an unknown slot or an error if a write
/// fails. Callers processing a batch log and skip per-slot failures.
pub fn apply_sensor_reading(
    conn: &mut SqliteConnection,
    slot_id: &str,
    occupied: bool,
    now: OffsetDateTime,
) -> Result<SensorOutcome, PersistenceError> {
    conn.transaction::<SensorOutcome, PersistenceError, _>(|conn| {
        let slot: Slot = queries::slot::get_slot(conn, slot_id)?;

        match reconcile_reading(slot.status, occupied) {
            SensorAction::Ignore => Ok(SensorOutcome::Ignored),
            SensorAction::MarkOccupied => {
                set_slot_status(conn, slot_id, SlotStatus::Occupied, "sensor", now)?;
                Ok(SensorOutcome::Occupied)
            }
            SensorAction::VehicleExit => {
                let settled = complete_exit(conn, slot_id, now)?;
                set_slot_status(conn, slot_id, SlotStatus::Free, "sensor", now)?;
                Ok(settled.map_or(SensorOutcome::ExitUnmatched, |(booking, payment)| {
                    SensorOutcome::Exit { booking, payment }
                }))
            }
        }
    })
}
