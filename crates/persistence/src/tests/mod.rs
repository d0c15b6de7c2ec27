// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

mod bootstrap;
mod sweeper;

const T0: OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

fn consumer_id(persistence: &mut Persistence) -> i64 {
    persistence
        .find_user_by_username("user1")
        .expect("query should succeed")
        .expect("user1 is seeded")
        .id
}
