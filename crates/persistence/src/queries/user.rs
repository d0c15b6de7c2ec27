// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::UserAccount;

use crate::data_models::UserCredentials;
use crate::error::PersistenceError;
use crate::schema::users;

/// Retrieves a user's credential row by username.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    Ok(users::table
        .filter(users::username.eq(username))
        .first(conn)
        .optional()?)
}

/// Retrieves a user's public account view by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored role is corrupt.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserAccount>, PersistenceError> {
    let row: Option<UserCredentials> = users::table
        .filter(users::id.eq(user_id))
        .first(conn)
        .optional()?;

    row.map(|credentials| credentials.to_account()).transpose()
}
