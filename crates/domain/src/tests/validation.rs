// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, compute_end_time, parse_rfc3339, validate_booking_request};
use time::{Duration, OffsetDateTime};

#[test]
fn test_valid_request_passes() {
    assert!(validate_booking_request("S1", 60).is_ok());
}

#[test]
fn test_empty_slot_id_rejected() {
    assert_eq!(
        validate_booking_request("", 60),
        Err(DomainError::MissingField("slot_id"))
    );
    assert_eq!(
        validate_booking_request("   ", 60),
        Err(DomainError::MissingField("slot_id"))
    );
}

#[test]
fn test_non_positive_duration_rejected() {
    assert_eq!(
        validate_booking_request("S1", 0),
        Err(DomainError::InvalidDuration { minutes: 0 })
    );
    assert_eq!(
        validate_booking_request("S1", -30),
        Err(DomainError::InvalidDuration { minutes: -30 })
    );
}

#[test]
fn test_compute_end_time_adds_duration() {
    let start: OffsetDateTime = parse_rfc3339("2026-03-02T08:00:00Z").unwrap();
    let end: OffsetDateTime = compute_end_time(start, 90).unwrap();
    assert_eq!(end - start, Duration::minutes(90));
}

#[test]
fn test_compute_end_time_overflow() {
    let result = compute_end_time(OffsetDateTime::new_utc(
        time::Date::MAX,
        time::Time::MIDNIGHT,
    ), 24 * 60);
    assert!(matches!(
        result,
        Err(DomainError::DateArithmeticOverflow { .. })
    ));
}
