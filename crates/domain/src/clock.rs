// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock access and timestamp conversion.
//!
//! All timestamps in the system are UTC instants stored and transported
//! as RFC 3339 strings. This module is the single place where strings and
//! `OffsetDateTime` values are converted.

use crate::error::DomainError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Returns the current UTC time.
#[must_use]
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Parses an RFC 3339 timestamp string into an `OffsetDateTime`.
///
/// # Errors
///
/// Returns `DomainError::TimestampParse` if the string is not a valid
/// RFC 3339 timestamp.
pub fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParse {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats an `OffsetDateTime` as an RFC 3339 string.
///
/// # Errors
///
/// Returns `DomainError::TimestampFormat` if formatting fails.
pub fn format_rfc3339(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::TimestampFormat(e.to_string()))
}
