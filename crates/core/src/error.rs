// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::{BookingStatus, DomainError};
use time::OffsetDateTime;

/// Errors produced by state machine decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested window overlaps a live booking on the same slot.
    ///
    /// This is an expected business condition, not a system fault.
    BookingConflict {
        /// The contested slot.
        slot_id: String,
    },
    /// A lifecycle transition was requested from the wrong status.
    InvalidTransition {
        /// The booking in question.
        booking_id: i64,
        /// Its current status.
        from: BookingStatus,
        /// The status the transition would have produced.
        attempted: BookingStatus,
    },
    /// The booking is terminal and immutable.
    BookingTerminal {
        /// The booking in question.
        booking_id: i64,
        /// Its terminal status.
        status: BookingStatus,
    },
    /// Access was requested before the grace window opened.
    AccessTooEarly {
        /// When the window opens.
        opens_at: OffsetDateTime,
    },
    /// Access was requested after the grace window closed.
    AccessWindowClosed {
        /// When the window closed.
        closed_at: OffsetDateTime,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain rule violation: {err}"),
            Self::BookingConflict { slot_id } => {
                write!(f, "Slot {slot_id} is already booked for this period")
            }
            Self::InvalidTransition {
                booking_id,
                from,
                attempted,
            } => {
                write!(
                    f,
                    "Booking {booking_id} cannot transition from {from} to {attempted}"
                )
            }
            Self::BookingTerminal { booking_id, status } => {
                write!(f, "Booking {booking_id} is already {status} and immutable")
            }
            Self::AccessTooEarly { opens_at } => {
                write!(f, "Too early. Access available from {opens_at}")
            }
            Self::AccessWindowClosed { closed_at } => {
                write!(f, "Access window closed at {closed_at}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
