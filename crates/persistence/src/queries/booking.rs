// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::{Booking, BookingStatus};

use crate::data_models::{BookingRow, BookingWithPayment, PaymentRow};
use crate::error::PersistenceError;
use crate::schema::{bookings, payments};

/// Lists all bookings ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table.order(bookings::id.asc()).load(conn)?;
    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Retrieves one booking.
///
/// # Errors
///
/// Returns `BookingNotFound` if the booking does not exist.
pub fn get_booking(conn: &mut SqliteConnection, booking_id: i64) -> Result<Booking, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::id.eq(booking_id))
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::BookingNotFound(booking_id))?
        .into_domain()
}

/// Loads the live (`active` or `entered`) bookings on a slot.
///
/// The conflict check and the exit selection both work from this set.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn live_bookings_for_slot(
    conn: &mut SqliteConnection,
    slot_id: &str,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::slot_id.eq(slot_id))
        .filter(bookings::status.eq_any([
            BookingStatus::Active.as_str(),
            BookingStatus::Entered.as_str(),
        ]))
        .load(conn)?;
    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Loads `active` bookings that have never been entered, for the
/// auto-cancel sweeper.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn unclaimed_active_bookings(
    conn: &mut SqliteConnection,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::status.eq(BookingStatus::Active.as_str()))
        .filter(bookings::entry_time.is_null())
        .load(conn)?;
    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Lists one user's bookings joined with their payments, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn booking_history(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<BookingWithPayment>, PersistenceError> {
    let rows: Vec<(BookingRow, Option<PaymentRow>)> = bookings::table
        .left_join(payments::table)
        .filter(bookings::user_id.eq(user_id))
        .order(bookings::id.desc())
        .load(conn)?;

    rows.into_iter()
        .map(|(booking, payment)| {
            Ok(BookingWithPayment {
                booking: booking.into_domain()?,
                payment: payment.map(PaymentRow::into_domain).transpose()?,
            })
        })
        .collect()
}
