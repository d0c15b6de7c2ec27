// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use diesel::SqliteConnection;
use parkd_domain::PaymentStatus;

use crate::error::PersistenceError;
use crate::schema::payments;

/// Aggregate view of settled payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueSummary {
    /// Sum of all `paid` payment amounts, in cents.
    pub total_cents: i64,
    /// Number of `paid` payments.
    pub payment_count: i64,
}

/// Totals the settled payments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn revenue_summary(conn: &mut SqliteConnection) -> Result<RevenueSummary, PersistenceError> {
    let total_cents: Option<i64> = payments::table
        .filter(payments::status.eq(PaymentStatus::Paid.as_str()))
        .select(sql::<Nullable<BigInt>>("SUM(amount_cents)"))
        .first(conn)?;
    let payment_count: i64 = payments::table
        .filter(payments::status.eq(PaymentStatus::Paid.as_str()))
        .count()
        .get_result(conn)?;

    Ok(RevenueSummary {
        total_cents: total_cents.unwrap_or(0),
        payment_count,
    })
}
