// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_domain::{Payment, PaymentStatus};
use parkd_events::{LogLevel, SystemEvent, tags};
use serde_json::json;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::PaymentRow;
use crate::error::PersistenceError;
use crate::mutations::log::append_event;
use crate::schema::payments;

/// Settles a pending payment owned by the given user.
///
/// The lookup matches `(payment_id, user_id, pending)`; an unknown ID,
/// someone else's payment, and an already-settled payment are all
/// indistinguishable `PaymentNotFound`.
///
/// # Errors
///
/// Returns `PaymentNotFound` as above, or a storage error.
pub fn settle_payment(
    conn: &mut SqliteConnection,
    payment_id: i64,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<Payment, PersistenceError> {
    conn.transaction::<Payment, PersistenceError, _>(|conn| {
        let row: Option<PaymentRow> = payments::table
            .filter(payments::id.eq(payment_id))
            .filter(payments::user_id.eq(user_id))
            .filter(payments::status.eq(PaymentStatus::Pending.as_str()))
            .first(conn)
            .optional()?;
        let row: PaymentRow = row.ok_or(PersistenceError::PaymentNotFound(payment_id))?;

        diesel::update(payments::table)
            .filter(payments::id.eq(payment_id))
            .set(payments::status.eq(PaymentStatus::Paid.as_str()))
            .execute(conn)?;

        let details: String = json!({
            "payment_id": payment_id,
            "booking_id": row.booking_id,
            "amount_cents": row.amount_cents,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::PAYMENT_SUCCESS, details, now),
        )?;

        info!(payment_id, user_id, amount_cents = row.amount_cents, "Payment settled");

        let mut payment: Payment = row.into_domain()?;
        payment.status = PaymentStatus::Paid;
        Ok(payment)
    })
}
