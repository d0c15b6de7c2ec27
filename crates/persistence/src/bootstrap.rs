// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! First-boot seeding.
//!
//! Provisions the demo accounts and the fixed slot set (S1-S3) exactly
//! once; `insert_or_ignore` makes reruns against an existing database
//! no-ops.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::{Role, SlotStatus, format_rfc3339, now_utc};
use tracing::info;

use crate::error::PersistenceError;
use crate::schema::{slots, users};

/// The slot IDs provisioned at first boot.
const SEED_SLOTS: [&str; 3] = ["S1", "S2", "S3"];

/// Seeds the demo users and the fixed slot set.
///
/// # Errors
///
/// Returns an error if hashing or the inserts fail.
pub fn seed_defaults(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let now: String = format_rfc3339(now_utc())?;

    for (username, password, role) in [
        ("admin", "admin123", Role::Admin),
        ("user1", "user123", Role::Consumer),
    ] {
        let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

        diesel::insert_or_ignore_into(users::table)
            .values((
                users::username.eq(username),
                users::password_hash.eq(&password_hash),
                users::role.eq(role.as_str()),
                users::created_at.eq(&now),
            ))
            .execute(conn)?;
    }

    for slot_id in SEED_SLOTS {
        diesel::insert_or_ignore_into(slots::table)
            .values((
                slots::id.eq(slot_id),
                slots::status.eq(SlotStatus::Free.as_str()),
                slots::category.eq("General"),
                slots::is_under_maintenance.eq(0),
            ))
            .execute(conn)?;
    }

    info!("Seeded default users and slots");
    Ok(())
}
