// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::{Slot, SlotStatus, format_rfc3339};
use parkd_events::{LogLevel, SystemEvent, tags};
use serde_json::json;
use time::OffsetDateTime;
use tracing::debug;

use crate::error::PersistenceError;
use crate::mutations::log::append_event;
use crate::queries;
use crate::schema::slots;

/// Writes a slot's status columns without logging.
///
/// Used by mutations whose own log entry already records the status
/// change (booking creation, vehicle exit, admin override).
pub(crate) fn write_status(
    conn: &mut SqliteConnection,
    slot_id: &str,
    status: SlotStatus,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(slots::table)
        .filter(slots::id.eq(slot_id))
        .set((
            slots::status.eq(status.as_str()),
            slots::is_under_maintenance.eq(i32::from(status == SlotStatus::Maintenance)),
            slots::last_sensor_update.eq(Some(format_rfc3339(now)?)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Sets a slot's status, logging the transition.
///
/// Idempotent: setting the status a slot already has performs no write
/// and appends no log row. Returns whether anything changed.
///
/// # Errors
///
/// Returns `SlotNotFound` if the slot does not exist.
pub fn set_slot_status(
    conn: &mut SqliteConnection,
    slot_id: &str,
    new_status: SlotStatus,
    cause: &str,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    conn.transaction::<bool, PersistenceError, _>(|conn| {
        let slot: Slot = queries::slot::get_slot(conn, slot_id)?;

        if slot.status == new_status {
            debug!(slot_id, status = %new_status, "Slot status unchanged, skipping");
            return Ok(false);
        }

        write_status(conn, slot_id, new_status, now)?;

        let details: String = json!({
            "slot_id": slot_id,
            "old": slot.status.as_str(),
            "new": new_status.as_str(),
            "cause": cause,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::SLOT_STATUS_CHANGE, details, now),
        )?;

        Ok(true)
    })
}
