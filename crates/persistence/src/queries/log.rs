// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::SystemLogRow;
use crate::error::PersistenceError;
use crate::schema::system_logs;

/// Lists all system log entries in append order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_logs(conn: &mut SqliteConnection) -> Result<Vec<SystemLogRow>, PersistenceError> {
    Ok(system_logs::table.order(system_logs::id.asc()).load(conn)?)
}

/// Lists the entries carrying a given event tag, in append order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn logs_for_event(
    conn: &mut SqliteConnection,
    event: &str,
) -> Result<Vec<SystemLogRow>, PersistenceError> {
    Ok(system_logs::table
        .filter(system_logs::event.eq(event))
        .order(system_logs::id.asc())
        .load(conn)?)
}
