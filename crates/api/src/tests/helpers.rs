// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use parkd_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::request_response::{BookRequest, BookResponse};

/// A fixed reference instant so tests are deterministic.
pub const T0: OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

/// The RFC 3339 form of [`T0`].
pub const T0_STR: &str = "2026-03-01T12:00:00Z";

/// Creates a fresh seeded in-memory store.
pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store")
}

/// Returns the seeded consumer account's ID.
pub fn consumer_id(persistence: &mut Persistence) -> i64 {
    persistence
        .find_user_by_username("user1")
        .expect("query")
        .expect("user1 is seeded")
        .id
}

/// Returns the seeded admin account's ID.
pub fn admin_id(persistence: &mut Persistence) -> i64 {
    persistence
        .find_user_by_username("admin")
        .expect("query")
        .expect("admin is seeded")
        .id
}

/// Books a slot starting at [`T0`] through the API handler.
pub fn book(persistence: &mut Persistence, slot_id: &str, duration_minutes: i64) -> BookResponse {
    let user_id: i64 = consumer_id(persistence);
    crate::handlers::book_slot(
        persistence,
        &BookRequest {
            user_id,
            slot_id: String::from(slot_id),
            start_time: String::from(T0_STR),
            duration_minutes,
            vehicle_number: None,
            phone_number: None,
        },
        T0,
    )
    .expect("booking should succeed")
}
