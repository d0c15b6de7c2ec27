// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::{BookingStatus, SlotStatus};

use crate::error::ApiError;
use crate::handlers::{book_slot, booking_history, cancel_booking, list_bookings};
use crate::request_response::{BookRequest, CancelRequest};
use crate::tests::helpers::{T0, T0_STR, book, consumer_id, store};

#[test]
fn booking_reserves_the_slot_for_the_window() {
    let mut persistence = store();

    let response = book(&mut persistence, "S1", 60);

    assert_eq!(response.booking.status, BookingStatus::Active);
    assert_eq!(response.booking.start_time, T0_STR);
    assert_eq!(response.booking.end_time, "2026-03-01T13:00:00Z");
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Booked
    );
}

#[test]
fn malformed_start_time_is_invalid_input() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);

    let err = book_slot(
        &mut persistence,
        &BookRequest {
            user_id,
            slot_id: String::from("S1"),
            start_time: String::from("tomorrow-ish"),
            duration_minutes: 60,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect_err("garbage timestamp must fail");

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "timestamp"
    ));
}

#[test]
fn zero_duration_is_invalid_input() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);

    let err = book_slot(
        &mut persistence,
        &BookRequest {
            user_id,
            slot_id: String::from("S1"),
            start_time: String::from(T0_STR),
            duration_minutes: 0,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect_err("zero duration must fail");

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "duration_minutes"
    ));
}

#[test]
fn empty_slot_id_is_invalid_input() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);

    let err = book_slot(
        &mut persistence,
        &BookRequest {
            user_id,
            slot_id: String::from("  "),
            start_time: String::from(T0_STR),
            duration_minutes: 60,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect_err("blank slot must fail");

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "slot_id"
    ));
}

#[test]
fn overlapping_window_is_a_rule_violation() {
    let mut persistence = store();
    book(&mut persistence, "S1", 60);
    let user_id = consumer_id(&mut persistence);

    let err = book_slot(
        &mut persistence,
        &BookRequest {
            user_id,
            slot_id: String::from("S1"),
            start_time: String::from("2026-03-01T12:30:00Z"),
            duration_minutes: 60,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect_err("overlap must fail");

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "no_double_booking"
    ));
}

#[test]
fn unknown_slot_is_not_found() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);

    let err = book_slot(
        &mut persistence,
        &BookRequest {
            user_id,
            slot_id: String::from("S9"),
            start_time: String::from(T0_STR),
            duration_minutes: 60,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect_err("unknown slot must fail");

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn cancellation_frees_the_slot() {
    let mut persistence = store();
    let booking_id = book(&mut persistence, "S1", 60).booking.id;

    let response = cancel_booking(&mut persistence, &CancelRequest { booking_id }, T0)
        .expect("cancel should succeed");

    assert_eq!(response.booking.status, BookingStatus::Cancelled);
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Free
    );
}

#[test]
fn cancelling_twice_is_a_lifecycle_violation() {
    let mut persistence = store();
    let booking_id = book(&mut persistence, "S1", 60).booking.id;
    cancel_booking(&mut persistence, &CancelRequest { booking_id }, T0).expect("first cancel");

    let err = cancel_booking(&mut persistence, &CancelRequest { booking_id }, T0)
        .expect_err("second cancel must fail");

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "booking_lifecycle"
    ));
}

#[test]
fn cancelling_an_unknown_booking_is_not_found() {
    let mut persistence = store();
    let err = cancel_booking(&mut persistence, &CancelRequest { booking_id: 42 }, T0)
        .expect_err("unknown booking must fail");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn ledger_listing_shows_all_bookings() {
    let mut persistence = store();
    book(&mut persistence, "S1", 60);
    book(&mut persistence, "S2", 30);

    let response = list_bookings(&mut persistence).expect("list should succeed");
    assert_eq!(response.bookings.len(), 2);
}

#[test]
fn history_for_an_unknown_user_is_not_found() {
    let mut persistence = store();
    let err = booking_history(&mut persistence, 9999).expect_err("unknown user must fail");
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "User"
    ));
}

#[test]
fn history_lists_the_users_bookings() {
    let mut persistence = store();
    book(&mut persistence, "S1", 60);
    let user_id = consumer_id(&mut persistence);

    let response = booking_history(&mut persistence, user_id).expect("history");
    assert_eq!(response.entries.len(), 1);
    assert!(response.entries[0].payment.is_none());
}
