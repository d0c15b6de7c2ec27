// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! System event log types.
//!
//! Every noteworthy state change in the facility appends one immutable
//! `SystemEvent` to the durable log. Events are write-only from the
//! core's perspective; they are read back only by external analytics.

use time::OffsetDateTime;

/// Severity of a system event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Routine state change.
    Info,
    /// Anomaly or administrative override; the operation still succeeded.
    Warn,
    /// A collaborator failure.
    Error,
}

impl LogLevel {
    /// Returns the canonical string form used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event tags. Analytics key off these strings, so they are stable.
pub mod tags {
    /// Successful credential check.
    pub const AUTH_SUCCESS: &str = "AUTH_SUCCESS";
    /// Failed credential check.
    pub const AUTH_FAILURE: &str = "AUTH_FAILURE";
    /// A booking was created and its slot reserved.
    pub const BOOKING_SUCCESS: &str = "BOOKING_SUCCESS";
    /// A booking was cancelled and its reservation released.
    pub const BOOKING_CANCELLED: &str = "BOOKING_CANCELLED";
    /// The entrance gate was opened for a reserved booking.
    pub const ACCESS_GRANTED: &str = "ACCESS_GRANTED";
    /// The entrance gate was opened for an unreserved vehicle.
    pub const DRIVE_UP_ACCESS: &str = "DRIVE_UP_ACCESS";
    /// A drive-up request was denied because the lot is full.
    pub const DRIVE_UP_REJECTED: &str = "DRIVE_UP_REJECTED";
    /// A gate was opened with the emergency duration.
    pub const EMERGENCY_GATE_OPEN: &str = "EMERGENCY_GATE_OPEN";
    /// A slot's status changed; details carry `{old, new, cause}`.
    pub const SLOT_STATUS_CHANGE: &str = "SLOT_STATUS_CHANGE";
    /// A vehicle exit completed a booking and created a charge.
    pub const VEHICLE_EXIT: &str = "VEHICLE_EXIT";
    /// A vehicle left a slot with no matching entered booking.
    pub const EXIT_NO_BOOKING: &str = "EXIT_NO_BOOKING";
    /// An administrator forced a slot status.
    pub const ADMIN_OVERRIDE: &str = "ADMIN_OVERRIDE";
    /// The sweeper cancelled an unclaimed booking.
    pub const AUTO_CANCEL: &str = "AUTO_CANCEL";
    /// A pending payment was settled.
    pub const PAYMENT_SUCCESS: &str = "PAYMENT_SUCCESS";
}

/// An immutable entry in the append-only system log.
///
/// Details are pre-serialized JSON so the log schema stays flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEvent {
    /// Severity.
    pub level: LogLevel,
    /// Stable event tag (see [`tags`]).
    pub event: &'static str,
    /// Structured details, serialized as JSON.
    pub details: String,
    /// When the event occurred.
    pub timestamp: OffsetDateTime,
}

impl SystemEvent {
    /// Creates a new system event.
    ///
    /// # Arguments
    ///
    /// * `level` - Severity of the event
    /// * `event` - Stable event tag
    /// * `details` - JSON-serialized details
    /// * `timestamp` - When the event occurred
    #[must_use]
    pub const fn new(
        level: LogLevel,
        event: &'static str,
        details: String,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            level,
            event,
            details,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_string_forms() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warn.as_str(), "WARN");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_event_creation_requires_all_fields() {
        let now: OffsetDateTime = OffsetDateTime::UNIX_EPOCH;
        let event: SystemEvent = SystemEvent::new(
            LogLevel::Info,
            tags::BOOKING_SUCCESS,
            String::from("{\"booking_id\":1}"),
            now,
        );

        assert_eq!(event.level, LogLevel::Info);
        assert_eq!(event.event, "BOOKING_SUCCESS");
        assert_eq!(event.details, "{\"booking_id\":1}");
        assert_eq!(event.timestamp, now);
    }
}
