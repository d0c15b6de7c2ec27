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

mod clock;
mod cost;
mod error;
mod overlap;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use clock::{format_rfc3339, now_utc, parse_rfc3339};
pub use cost::{MINIMUM_CHARGE_CENTS, RATE_CENTS_PER_HOUR, calculate_cost_cents};
pub use error::DomainError;
pub use overlap::windows_overlap;
pub use types::{
    Booking, BookingStatus, GateId, GateState, LotStatus, Payment, PaymentStatus, Role, Slot,
    SlotStatus, UserAccount,
};
pub use validation::{compute_end_time, validate_booking_request};
