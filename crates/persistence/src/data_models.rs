// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversions into domain values.
//!
//! Statuses and timestamps are stored as text; decoding failures surface
//! as `PersistenceError::CorruptRow` rather than panicking.

use diesel::prelude::*;
use parkd_domain::{
    Booking, BookingStatus, Payment, PaymentStatus, Role, Slot, SlotStatus, UserAccount,
    parse_rfc3339,
};
use time::OffsetDateTime;

use crate::error::PersistenceError;

/// A stored user row including the credential hash.
///
/// Only the authentication path sees this type; everything else works
/// with [`UserAccount`].
#[derive(Debug, Clone, Queryable)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl UserCredentials {
    /// Converts to the hash-free domain view.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is not a known role.
    pub fn to_account(&self) -> Result<UserAccount, PersistenceError> {
        Ok(UserAccount {
            id: self.id,
            username: self.username.clone(),
            role: Role::parse(&self.role).map_err(corrupt)?,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct SlotRow {
    pub id: String,
    pub status: String,
    pub category: String,
    pub is_under_maintenance: i32,
    pub last_sensor_update: Option<String>,
}

impl SlotRow {
    pub(crate) fn into_domain(self) -> Result<Slot, PersistenceError> {
        Ok(Slot {
            id: self.id,
            status: SlotStatus::parse(&self.status).map_err(corrupt)?,
            category: self.category,
            is_under_maintenance: self.is_under_maintenance != 0,
            last_sensor_update: parse_optional(self.last_sensor_update.as_deref())?,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub slot_id: String,
    pub start_time: String,
    pub end_time: String,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub status: String,
    pub vehicle_number: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: String,
}

impl BookingRow {
    pub(crate) fn into_domain(self) -> Result<Booking, PersistenceError> {
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            slot_id: self.slot_id,
            start_time: parse_rfc3339(&self.start_time).map_err(corrupt)?,
            end_time: parse_rfc3339(&self.end_time).map_err(corrupt)?,
            entry_time: parse_optional(self.entry_time.as_deref())?,
            exit_time: parse_optional(self.exit_time.as_deref())?,
            status: BookingStatus::parse(&self.status).map_err(corrupt)?,
            vehicle_number: self.vehicle_number,
            phone_number: self.phone_number,
            created_at: parse_rfc3339(&self.created_at).map_err(corrupt)?,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct PaymentRow {
    pub id: i64,
    pub booking_id: i64,
    pub user_id: i64,
    pub amount_cents: i64,
    pub status: String,
    pub created_at: String,
}

impl PaymentRow {
    pub(crate) fn into_domain(self) -> Result<Payment, PersistenceError> {
        Ok(Payment {
            id: self.id,
            booking_id: self.booking_id,
            user_id: self.user_id,
            amount_cents: self.amount_cents,
            status: PaymentStatus::parse(&self.status).map_err(corrupt)?,
            created_at: parse_rfc3339(&self.created_at).map_err(corrupt)?,
        })
    }
}

/// A stored system log entry.
#[derive(Debug, Clone, Queryable)]
pub struct SystemLogRow {
    pub id: i64,
    pub level: String,
    pub event: String,
    pub details: String,
    pub timestamp: String,
}

/// A booking joined with its payment (if a vehicle exit created one).
#[derive(Debug, Clone)]
pub struct BookingWithPayment {
    pub booking: Booking,
    pub payment: Option<Payment>,
}

fn parse_optional(value: Option<&str>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value
        .map(|text| parse_rfc3339(text).map_err(corrupt))
        .transpose()
}

fn corrupt<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::CorruptRow(err.to_string())
}
