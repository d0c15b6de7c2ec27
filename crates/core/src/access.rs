// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The access-window policy.
//!
//! Automated entry for a reserved booking is permitted only inside the
//! grace window `[start - 5min, start + 5min]`, inclusive at both ends.
//! Rejections carry the violated boundary so the caller can tell the
//! driver exactly when the window opens or closed.

use crate::error::CoreError;
use time::{Duration, OffsetDateTime};

/// The grace period on either side of a booking's start time. Also used
/// by the auto-cancel sweeper as the no-show deadline.
pub const ACCESS_GRACE: Duration = Duration::minutes(5);

/// Evaluates the access window for a booking starting at `start`.
///
/// # Errors
///
/// Returns `CoreError::AccessTooEarly` before the window opens and
/// `CoreError::AccessWindowClosed` after it closes. Both boundaries are
/// inside the window.
pub fn evaluate_access_window(
    start: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    let opens_at: OffsetDateTime = start - ACCESS_GRACE;
    let closes_at: OffsetDateTime = start + ACCESS_GRACE;

    if now < opens_at {
        return Err(CoreError::AccessTooEarly { opens_at });
    }
    if now > closes_at {
        return Err(CoreError::AccessWindowClosed {
            closed_at: closes_at,
        });
    }
    Ok(())
}
