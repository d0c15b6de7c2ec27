// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The booking/occupancy/access state machine.
//!
//! Every function in this crate is a pure decision over snapshots of
//! state: callers load the relevant rows, ask this crate what transition
//! (if any) is legal, and apply the result inside their own transaction.
//! Keeping decisions pure means the conflict rule, the grace window, the
//! sensor reconciliation table, and the gate deadline bookkeeping are all
//! testable without a database or timers.

mod access;
mod booking;
mod error;
mod gate;
mod sensor;

#[cfg(test)]
mod tests;

pub use access::{ACCESS_GRACE, evaluate_access_window};
pub use booking::{
    CancellationPlan, SlotRelease, check_booking_conflict, completion_transition,
    entry_transition, is_grace_expired, plan_cancellation, select_exit_booking,
};
pub use error::CoreError;
pub use gate::{EMERGENCY_OPEN_DURATION, GATE_OPEN_DURATION, GateBank, GateSnapshot};
pub use sensor::{SensorAction, reconcile_reading};
