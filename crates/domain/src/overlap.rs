// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The half-open interval overlap rule behind the no-double-booking
//! invariant.
//!
//! Two reservation windows conflict when `(a.start < b.end) && (a.end >
//! b.start)`. Windows are half-open `[start, end)`, so a window ending
//! exactly when another starts does not conflict.

use time::OffsetDateTime;

/// Returns true when two half-open windows overlap.
#[must_use]
pub fn windows_overlap(
    a_start: OffsetDateTime,
    a_end: OffsetDateTime,
    b_start: OffsetDateTime,
    b_end: OffsetDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    const fn t(hour: u8) -> OffsetDateTime {
        let base: OffsetDateTime = datetime!(2026-03-02 00:00 UTC);
        base.saturating_add(Duration::hours(hour as i64))
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        assert!(!windows_overlap(t(8), t(9), t(10), t(11)));
        assert!(!windows_overlap(t(10), t(11), t(8), t(9)));
    }

    #[test]
    fn test_boundary_touch_is_not_overlap() {
        // Existing window ends exactly when the new one starts.
        assert!(!windows_overlap(t(8), t(10), t(10), t(12)));
        assert!(!windows_overlap(t(10), t(12), t(8), t(10)));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(windows_overlap(t(8), t(10), t(9), t(11)));
        assert!(windows_overlap(t(9), t(11), t(8), t(10)));
    }

    #[test]
    fn test_containment_is_overlap() {
        assert!(windows_overlap(t(8), t(12), t(9), t(10)));
        assert!(windows_overlap(t(9), t(10), t(8), t(12)));
    }

    #[test]
    fn test_identical_windows_overlap() {
        assert!(windows_overlap(t(8), t(10), t(8), t(10)));
    }
}
