// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation for booking requests.
//!
//! Validation rejects malformed input before the registry is touched;
//! a validation failure must never have side effects.

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// Validates the required fields of a booking request.
///
/// # Errors
///
/// Returns an error if:
/// - The slot identifier is empty
/// - The duration is zero or negative
pub fn validate_booking_request(slot_id: &str, duration_minutes: i64) -> Result<(), DomainError> {
    if slot_id.trim().is_empty() {
        return Err(DomainError::MissingField("slot_id"));
    }
    if duration_minutes < 1 {
        return Err(DomainError::InvalidDuration {
            minutes: duration_minutes,
        });
    }
    Ok(())
}

/// Computes a booking's end time as `start + duration`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the addition leaves
/// the representable date range.
pub fn compute_end_time(
    start: OffsetDateTime,
    duration_minutes: i64,
) -> Result<OffsetDateTime, DomainError> {
    start
        .checked_add(Duration::minutes(duration_minutes))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {duration_minutes} minutes to booking start"),
        })
}
