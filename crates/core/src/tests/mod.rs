// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use parkd_domain::{Booking, BookingStatus};
use time::OffsetDateTime;
use time::macros::datetime;

mod gate;

/// A baseline instant the tests measure offsets against.
const T0: OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

fn booking_fixture(
    id: i64,
    slot_id: &str,
    status: BookingStatus,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
) -> Booking {
    Booking {
        id,
        user_id: 1,
        slot_id: String::from(slot_id),
        start_time,
        end_time,
        entry_time: None,
        exit_time: None,
        status,
        vehicle_number: None,
        phone_number: None,
        created_at: start_time,
    }
}
