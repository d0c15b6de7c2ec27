// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::format_rfc3339;
use parkd_events::SystemEvent;

use crate::error::PersistenceError;
use crate::schema::system_logs;

/// Appends one entry to the durable system log.
///
/// # Errors
///
/// Returns an error if the insert fails or the timestamp cannot be
/// formatted.
pub fn append_event(conn: &mut SqliteConnection, event: &SystemEvent) -> Result<(), PersistenceError> {
    diesel::insert_into(system_logs::table)
        .values((
            system_logs::level.eq(event.level.as_str()),
            system_logs::event.eq(event.event),
            system_logs::details.eq(&event.details),
            system_logs::timestamp.eq(format_rfc3339(event.timestamp)?),
        ))
        .execute(conn)?;
    Ok(())
}
