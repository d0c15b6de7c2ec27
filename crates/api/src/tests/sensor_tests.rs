// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::SlotStatus;
use time::Duration;

use crate::handlers::{apply_sensor_batch, request_access};
use crate::request_response::{AccessRequest, SensorBatchRequest, SensorReading};
use crate::tests::helpers::{T0, book, store};

fn reading(slot_id: &str, occupied: bool) -> SensorReading {
    SensorReading {
        slot_id: String::from(slot_id),
        occupied,
    }
}

#[test]
fn batch_applies_each_reading_in_order() {
    let mut persistence = store();
    book(&mut persistence, "S1", 60);

    let response = apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S1", true), reading("S2", false)],
        },
        T0,
    )
    .expect("batch should succeed");

    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].outcome, "occupied");
    assert_eq!(response.results[1].outcome, "ignored");
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Occupied
    );
}

#[test]
fn unknown_slots_are_skipped_without_poisoning_the_batch() {
    let mut persistence = store();

    let response = apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S9", true), reading("S2", true)],
        },
        T0,
    )
    .expect("batch should succeed");

    assert_eq!(response.results[0].outcome, "skipped");
    assert_eq!(response.results[1].outcome, "occupied");
    assert_eq!(
        persistence.get_slot("S2").expect("slot").status,
        SlotStatus::Occupied
    );
}

#[test]
fn vacancy_after_entry_reports_an_exit() {
    let mut persistence = store();
    let booking_id = book(&mut persistence, "S1", 120).booking.id;
    request_access(&mut persistence, &AccessRequest { booking_id }, T0).expect("entry");
    apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S1", true)],
        },
        T0,
    )
    .expect("arrival");

    let response = apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S1", false)],
        },
        T0 + Duration::minutes(90),
    )
    .expect("exit");

    assert_eq!(response.results[0].outcome, "exit");
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Free
    );
}

#[test]
fn vacancy_without_a_booking_reports_an_unmatched_exit() {
    let mut persistence = store();
    apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S2", true)],
        },
        T0,
    )
    .expect("arrival");

    let response = apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest {
            readings: vec![reading("S2", false)],
        },
        T0 + Duration::minutes(5),
    )
    .expect("exit");

    assert_eq!(response.results[0].outcome, "exit_unmatched");
}

#[test]
fn an_empty_batch_is_a_no_op() {
    let mut persistence = store();
    let response = apply_sensor_batch(
        &mut persistence,
        &SensorBatchRequest { readings: vec![] },
        T0,
    )
    .expect("batch should succeed");
    assert!(response.results.is_empty());
}
