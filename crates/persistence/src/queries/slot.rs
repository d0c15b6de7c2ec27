// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::{Slot, SlotStatus};

use crate::data_models::SlotRow;
use crate::error::PersistenceError;
use crate::schema::slots;

/// Lists all slots ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_slots(conn: &mut SqliteConnection) -> Result<Vec<Slot>, PersistenceError> {
    let rows: Vec<SlotRow> = slots::table.order(slots::id.asc()).load(conn)?;
    rows.into_iter().map(SlotRow::into_domain).collect()
}

/// Retrieves one slot.
///
/// # Errors
///
/// Returns `SlotNotFound` if the slot does not exist.
pub fn get_slot(conn: &mut SqliteConnection, slot_id: &str) -> Result<Slot, PersistenceError> {
    let row: Option<SlotRow> = slots::table
        .filter(slots::id.eq(slot_id))
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::SlotNotFound(String::from(slot_id)))?
        .into_domain()
}

/// Counts slots currently `free`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn free_slot_count(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(slots::table
        .filter(slots::status.eq(SlotStatus::Free.as_str()))
        .count()
        .get_result(conn)?)
}
