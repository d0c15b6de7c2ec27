// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A slot status string did not match any known status.
    InvalidSlotStatus(String),
    /// A booking status string did not match any known status.
    InvalidBookingStatus(String),
    /// A payment status string did not match any known status.
    InvalidPaymentStatus(String),
    /// A role string did not match any known role.
    InvalidRole(String),
    /// A gate identifier did not match any known gate.
    InvalidGate(String),
    /// A required field was missing or empty.
    MissingField(&'static str),
    /// A booking duration was zero or negative.
    InvalidDuration {
        /// The rejected duration in minutes.
        minutes: i64,
    },
    /// Failed to parse a timestamp from a string.
    TimestampParse {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp as RFC 3339.
    TimestampFormat(String),
    /// Date arithmetic overflowed.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSlotStatus(value) => write!(f, "Invalid slot status: '{value}'"),
            Self::InvalidBookingStatus(value) => write!(f, "Invalid booking status: '{value}'"),
            Self::InvalidPaymentStatus(value) => write!(f, "Invalid payment status: '{value}'"),
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidGate(value) => {
                write!(f, "Invalid gate: '{value}'. Use 'entrance' or 'exit'")
            }
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing"),
            Self::InvalidDuration { minutes } => {
                write!(f, "Invalid duration: {minutes} minutes. Must be at least 1")
            }
            Self::TimestampParse { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::TimestampFormat(msg) => write!(f, "Failed to format timestamp: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
