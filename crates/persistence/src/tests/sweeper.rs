// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::{BookingStatus, SlotStatus};
use parkd_events::tags;
use time::Duration;

use crate::tests::{T0, consumer_id, store};

#[test]
fn sweeper_cancels_unclaimed_bookings_past_grace() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);
    let booking = persistence
        .create_booking(user_id, "S1", T0, T0 + Duration::hours(1), None, None, T0)
        .expect("booking");

    let swept = persistence
        .auto_cancel_expired(T0 + Duration::minutes(5) + Duration::seconds(1))
        .expect("sweep");

    assert_eq!(swept.len(), 1);
    assert_eq!(swept[0].id, booking.id);
    assert_eq!(
        persistence
            .get_booking(booking.id)
            .expect("booking")
            .status,
        BookingStatus::Cancelled
    );
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Free
    );
    assert_eq!(
        persistence
            .logs_for_event(tags::AUTO_CANCEL)
            .expect("logs")
            .len(),
        1
    );
}

#[test]
fn sweeper_leaves_bookings_inside_grace_alone() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);
    let booking = persistence
        .create_booking(user_id, "S1", T0, T0 + Duration::hours(1), None, None, T0)
        .expect("booking");

    let swept = persistence
        .auto_cancel_expired(T0 + Duration::minutes(5))
        .expect("sweep");

    assert!(swept.is_empty());
    assert_eq!(
        persistence
            .get_booking(booking.id)
            .expect("booking")
            .status,
        BookingStatus::Active
    );
}

#[test]
fn sweeper_ignores_entered_bookings() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);
    let booking = persistence
        .create_booking(user_id, "S1", T0, T0 + Duration::hours(1), None, None, T0)
        .expect("booking");
    persistence.mark_entered(booking.id, T0).expect("entry");

    let swept = persistence
        .auto_cancel_expired(T0 + Duration::hours(2))
        .expect("sweep");

    assert!(swept.is_empty());
}

#[test]
fn sweeper_retains_sensor_occupancy_on_the_slot() {
    let mut persistence = store();
    let user_id = consumer_id(&mut persistence);
    persistence
        .create_booking(user_id, "S1", T0, T0 + Duration::hours(1), None, None, T0)
        .expect("booking");
    // Sensor reports a vehicle even though the booking was never entered.
    persistence
        .apply_sensor_reading("S1", true, T0)
        .expect("arrival");

    let swept = persistence
        .auto_cancel_expired(T0 + Duration::minutes(10))
        .expect("sweep");

    assert_eq!(swept.len(), 1);
    assert_eq!(
        persistence.get_slot("S1").expect("slot").status,
        SlotStatus::Occupied
    );
}
