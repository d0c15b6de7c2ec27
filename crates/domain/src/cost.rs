// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cost calculator.
//!
//! A pure function mapping a booking's entry/exit span to a charge.
//! Amounts are integer cents so the result is deterministic; the hourly
//! rate is prorated by the second and rounded to the nearest cent, with
//! a flat minimum charge.

use time::OffsetDateTime;

/// Parking rate: $4.00 per hour.
pub const RATE_CENTS_PER_HOUR: i64 = 400;

/// Minimum charge: $2.00. Applied to any stay, including degenerate
/// spans (missing or inverted timestamps).
pub const MINIMUM_CHARGE_CENTS: i64 = 200;

/// Computes the charge in cents for a stay between `entry` and `exit`.
///
/// Missing timestamps and non-positive spans charge the minimum, matching
/// the ledger's treatment of anomalous exits as non-fatal.
#[must_use]
pub fn calculate_cost_cents(entry: Option<OffsetDateTime>, exit: Option<OffsetDateTime>) -> i64 {
    let (Some(entry), Some(exit)) = (entry, exit) else {
        return MINIMUM_CHARGE_CENTS;
    };

    let seconds: i64 = (exit - entry).whole_seconds();
    if seconds <= 0 {
        return MINIMUM_CHARGE_CENTS;
    }

    // Prorate per second, rounding to the nearest cent.
    let cents: i64 = (seconds * RATE_CENTS_PER_HOUR + 1800) / 3600;
    cents.max(MINIMUM_CHARGE_CENTS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    #[test]
    fn test_ninety_minutes_is_six_dollars() {
        let entry: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        let exit: OffsetDateTime = entry + Duration::minutes(90);
        assert_eq!(calculate_cost_cents(Some(entry), Some(exit)), 600);
    }

    #[test]
    fn test_short_stay_charges_minimum() {
        let entry: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        let exit: OffsetDateTime = entry + Duration::minutes(10);
        assert_eq!(
            calculate_cost_cents(Some(entry), Some(exit)),
            MINIMUM_CHARGE_CENTS
        );
    }

    #[test]
    fn test_exactly_half_hour_is_two_dollars() {
        let entry: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        let exit: OffsetDateTime = entry + Duration::minutes(30);
        assert_eq!(calculate_cost_cents(Some(entry), Some(exit)), 200);
    }

    #[test]
    fn test_three_hours() {
        let entry: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        let exit: OffsetDateTime = entry + Duration::hours(3);
        assert_eq!(calculate_cost_cents(Some(entry), Some(exit)), 1200);
    }

    #[test]
    fn test_missing_entry_charges_minimum() {
        let exit: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        assert_eq!(calculate_cost_cents(None, Some(exit)), MINIMUM_CHARGE_CENTS);
    }

    #[test]
    fn test_inverted_span_charges_minimum() {
        let entry: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);
        let exit: OffsetDateTime = entry - Duration::hours(1);
        assert_eq!(
            calculate_cost_cents(Some(entry), Some(exit)),
            MINIMUM_CHARGE_CENTS
        );
    }
}
