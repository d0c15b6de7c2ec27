// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use parkd_core::CoreError;
use parkd_domain::DomainError;
use parkd_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// The server maps each variant to exactly one HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Access was requested outside the booking's grace window.
    AccessWindowViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A business rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::AccessWindowViolation { message } => f.write_str(message),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidSlotStatus(value)
        | DomainError::InvalidBookingStatus(value)
        | DomainError::InvalidPaymentStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{value}'"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{value}'"),
        },
        DomainError::InvalidGate(value) => ApiError::InvalidInput {
            field: String::from("gate"),
            message: format!("Unknown gate '{value}'. Use 'entrance' or 'exit'"),
        },
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: String::from(field),
            message: String::from("Required field is missing or empty"),
        },
        DomainError::InvalidDuration { minutes } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("Invalid duration: {minutes} minutes. Must be at least 1"),
        },
        DomainError::TimestampParse { value, error } => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: format!("Failed to parse timestamp '{value}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::TimestampFormat(msg) => ApiError::Internal {
            message: format!("Failed to format timestamp: {msg}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::BookingConflict { slot_id } => ApiError::DomainRuleViolation {
            rule: String::from("no_double_booking"),
            message: format!("Slot {slot_id} is already booked for the requested period"),
        },
        err @ (CoreError::InvalidTransition { .. } | CoreError::BookingTerminal { .. }) => {
            ApiError::DomainRuleViolation {
                rule: String::from("booking_lifecycle"),
                message: err.to_string(),
            }
        }
        err @ (CoreError::AccessTooEarly { .. } | CoreError::AccessWindowClosed { .. }) => {
            ApiError::AccessWindowViolation {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SlotNotFound(slot_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot '{slot_id}' does not exist"),
        },
        PersistenceError::BookingNotFound(booking_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        },
        PersistenceError::PaymentNotFound(payment_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Payment"),
            message: format!("Payment {payment_id} does not exist or is not payable"),
        },
        PersistenceError::Rule(core_err) => translate_core_error(core_err),
        err => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
