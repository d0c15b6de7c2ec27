// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking ledger transitions.
//!
//! ## Invariants
//!
//! - At most one live (`active` or `entered`) booking may claim a slot
//!   with an overlapping `[start, end)` window
//! - `entry_time` is set only on active→entered
//! - `exit_time` is set only on entered→completed
//! - Terminal bookings (`completed`, `cancelled`) are immutable
//!
//! Conflict checking and the write it guards must be applied inside one
//! transaction by the caller; the check alone proves nothing once the
//! snapshot goes stale.

use crate::access::ACCESS_GRACE;
use crate::error::CoreError;
use parkd_domain::{Booking, BookingStatus, SlotStatus, windows_overlap};
use time::OffsetDateTime;

/// How a cancellation should treat the booking's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRelease {
    /// The slot held only this reservation; release it to `free`.
    Freed,
    /// The slot carries a status the reservation does not own
    /// (sensor-reported occupancy or a maintenance hold); leave it.
    Retained(SlotStatus),
}

/// The decided outcome of a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPlan {
    /// What to do with the booking's slot.
    pub slot_release: SlotRelease,
}

/// Checks a proposed booking window against the slot's live bookings.
///
/// A live booking is one with status `active` or `entered`; terminal
/// bookings never conflict. Overlap is half-open, so a window starting
/// exactly when another ends is allowed.
///
/// # Errors
///
/// Returns `CoreError::BookingConflict` if any live booking on the slot
/// overlaps the proposed window.
pub fn check_booking_conflict(
    existing: &[Booking],
    slot_id: &str,
    new_start: OffsetDateTime,
    new_end: OffsetDateTime,
) -> Result<(), CoreError> {
    let conflict: bool = existing.iter().any(|booking| {
        booking.slot_id == slot_id
            && matches!(
                booking.status,
                BookingStatus::Active | BookingStatus::Entered
            )
            && windows_overlap(booking.start_time, booking.end_time, new_start, new_end)
    });

    if conflict {
        return Err(CoreError::BookingConflict {
            slot_id: slot_id.to_string(),
        });
    }
    Ok(())
}

/// Decides how to cancel a booking.
///
/// Valid from any non-terminal status. The slot is released only if it
/// currently carries the reservation-only `booked` status; a slot the
/// sensor holds `occupied` (or an admin holds `maintenance`) keeps that
/// status, since the reservation never owned it.
///
/// # Errors
///
/// Returns `CoreError::BookingTerminal` if the booking is already
/// completed or cancelled.
pub fn plan_cancellation(
    booking: &Booking,
    slot_status: SlotStatus,
) -> Result<CancellationPlan, CoreError> {
    if booking.status.is_terminal() {
        return Err(CoreError::BookingTerminal {
            booking_id: booking.id,
            status: booking.status,
        });
    }

    let slot_release: SlotRelease = match slot_status {
        SlotStatus::Booked => SlotRelease::Freed,
        retained => SlotRelease::Retained(retained),
    };

    Ok(CancellationPlan { slot_release })
}

/// Validates the active→entered transition.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` unless the booking is `active`.
pub fn entry_transition(booking: &Booking) -> Result<(), CoreError> {
    if booking.status == BookingStatus::Active {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            booking_id: booking.id,
            from: booking.status,
            attempted: BookingStatus::Entered,
        })
    }
}

/// Selects the booking a vehicle exit should complete.
///
/// Picks the most recent `entered` booking on the slot: latest start
/// time, then highest id. Returns `None` when no entered booking exists;
/// the caller logs that as a non-fatal anomaly.
#[must_use]
pub fn select_exit_booking<'a>(bookings: &'a [Booking], slot_id: &str) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.slot_id == slot_id && b.status == BookingStatus::Entered)
        .max_by_key(|b| (b.start_time, b.id))
}

/// Validates the entered→completed transition.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` unless the booking is `entered`.
pub fn completion_transition(booking: &Booking) -> Result<(), CoreError> {
    if booking.status == BookingStatus::Entered {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            booking_id: booking.id,
            from: booking.status,
            attempted: BookingStatus::Completed,
        })
    }
}

/// Whether the auto-cancel sweeper should reclaim this booking.
///
/// True for `active` bookings that were never entered and whose start
/// time plus the grace period is in the past.
#[must_use]
pub fn is_grace_expired(booking: &Booking, now: OffsetDateTime) -> bool {
    booking.status == BookingStatus::Active
        && booking.entry_time.is_none()
        && booking.start_time + ACCESS_GRACE < now
}
