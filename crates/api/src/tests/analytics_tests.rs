// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use crate::analytics::{occupancy_report, peak_hours_report, slot_utilization, user_stats};
use crate::error::ApiError;
use crate::handlers::{apply_sensor_batch, cancel_booking, pay, request_access};
use crate::request_response::{
    AccessRequest, CancelRequest, PayRequest, SensorBatchRequest, SensorReading,
};
use crate::tests::helpers::{T0, book, consumer_id, store};

fn reading(slot_id: &str, occupied: bool) -> SensorBatchRequest {
    SensorBatchRequest {
        readings: vec![SensorReading {
            slot_id: String::from(slot_id),
            occupied,
        }],
    }
}

/// Books S1, enters, and exits after 90 minutes.
fn complete_a_visit(persistence: &mut parkd_persistence::Persistence) {
    let booking_id = book(persistence, "S1", 180).booking.id;
    request_access(persistence, &AccessRequest { booking_id }, T0).expect("entry");
    apply_sensor_batch(persistence, &reading("S1", true), T0).expect("arrival");
    apply_sensor_batch(persistence, &reading("S1", false), T0 + Duration::minutes(90))
        .expect("exit");
}

#[test]
fn occupancy_of_a_fresh_lot_is_a_single_zero_point() {
    let mut persistence = store();

    let report = occupancy_report(&mut persistence, T0).expect("report");

    assert_eq!(report.total_slots, 3);
    assert_eq!(report.occupied, 0);
    assert_eq!(report.trend.len(), 1);
    assert_eq!(report.trend[0].occupied, 0);
    assert_eq!(report.trend[0].time, "2026-03-01T12:00");
}

#[test]
fn occupancy_trend_reconstructs_earlier_minutes_from_the_log() {
    let mut persistence = store();
    apply_sensor_batch(&mut persistence, &reading("S1", true), T0).expect("arrival");
    apply_sensor_batch(&mut persistence, &reading("S2", true), T0).expect("arrival");

    let report =
        occupancy_report(&mut persistence, T0 + Duration::minutes(2)).expect("report");

    assert_eq!(report.occupied, 2);
    assert_eq!(report.trend.len(), 2);
    // The point at the arrival minute holds the count between the two
    // transitions; the current minute holds the final count.
    assert_eq!(report.trend[0].time, "2026-03-01T12:00");
    assert_eq!(report.trend[0].occupied, 1);
    assert_eq!(report.trend[1].time, "2026-03-01T12:02");
    assert_eq!(report.trend[1].occupied, 2);
}

#[test]
fn peak_hours_excludes_cancelled_bookings_and_covers_all_hours() {
    let mut persistence = store();
    book(&mut persistence, "S1", 60);
    book(&mut persistence, "S2", 60);
    let cancelled = book(&mut persistence, "S3", 60).booking.id;
    cancel_booking(
        &mut persistence,
        &CancelRequest {
            booking_id: cancelled,
        },
        T0,
    )
    .expect("cancel");

    let report = peak_hours_report(&mut persistence).expect("report");

    assert_eq!(report.hours.len(), 24);
    assert_eq!(report.hours[12].hour, 12);
    assert_eq!(report.hours[12].bookings, 2);
    assert_eq!(report.hours[12].label, "12:00");
    assert_eq!(report.hours[0].bookings, 0);
}

#[test]
fn stats_for_an_unknown_user_are_not_found() {
    let mut persistence = store();

    let err = user_stats(&mut persistence, 999).expect_err("unknown user must fail");

    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "User"
    ));
}

#[test]
fn user_stats_track_completion_and_settled_spending() {
    let mut persistence = store();
    complete_a_visit(&mut persistence);
    let user_id = consumer_id(&mut persistence);

    let before = user_stats(&mut persistence, user_id).expect("stats");
    assert_eq!(before.total_bookings, 1);
    assert_eq!(before.completed_bookings, 1);
    assert_eq!(before.total_spent_cents, 0);
    assert_eq!(before.average_stay_minutes, Some(90));

    let payment_id = persistence
        .booking_history(user_id)
        .expect("history")
        .first()
        .and_then(|entry| entry.payment.as_ref().map(|payment| payment.id))
        .expect("exit created a charge");
    pay(
        &mut persistence,
        &PayRequest {
            payment_id,
            user_id,
        },
        T0 + Duration::hours(2),
    )
    .expect("payment");

    let after = user_stats(&mut persistence, user_id).expect("stats");
    assert_eq!(after.total_spent_cents, 600);
}

#[test]
fn slot_utilization_ranks_busiest_slots_and_includes_idle_ones() {
    let mut persistence = store();
    complete_a_visit(&mut persistence);
    let cancelled = book(&mut persistence, "S2", 60).booking.id;
    cancel_booking(
        &mut persistence,
        &CancelRequest {
            booking_id: cancelled,
        },
        T0,
    )
    .expect("cancel");

    let report = slot_utilization(&mut persistence).expect("report");

    assert_eq!(report.slots.len(), 3);
    assert_eq!(report.slots[0].slot_id, "S1");
    assert_eq!(report.slots[0].completed_bookings, 1);
    assert_eq!(report.slots[0].average_stay_minutes, Some(90));
    assert_eq!(report.slots[1].slot_id, "S2");
    assert_eq!(report.slots[1].cancelled_bookings, 1);
    assert_eq!(report.slots[1].average_stay_minutes, None);
    assert_eq!(report.slots[2].slot_id, "S3");
    assert_eq!(report.slots[2].total_bookings, 0);
}
