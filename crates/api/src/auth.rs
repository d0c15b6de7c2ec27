// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential verification and role enforcement.
//!
//! Passwords are verified against bcrypt hashes that never leave the
//! persistence layer. Every attempt, successful or not, appends one
//! entry to the durable system log.

use parkd_domain::{Role, UserAccount};
use parkd_events::{LogLevel, SystemEvent, tags};
use parkd_persistence::Persistence;
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{AuthRequest, AuthResponse};

/// The single rejection message for bad credentials. Deliberately does
/// not distinguish an unknown username from a wrong password.
const BAD_CREDENTIALS: &str = "Invalid username or password";

fn log_failure(
    persistence: &mut Persistence,
    username: &str,
    reason: &str,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let details: String = json!({ "username": username, "reason": reason }).to_string();
    persistence
        .append_log(&SystemEvent::new(
            LogLevel::Warn,
            tags::AUTH_FAILURE,
            details,
            now,
        ))
        .map_err(translate_persistence_error)
}

/// Verifies a username/password pair.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for an unknown username or a wrong
/// password, without distinguishing the two.
pub fn authenticate(
    persistence: &mut Persistence,
    request: &AuthRequest,
    now: OffsetDateTime,
) -> Result<AuthResponse, ApiError> {
    let Some(credentials) = persistence
        .find_user_by_username(&request.username)
        .map_err(translate_persistence_error)?
    else {
        warn!(username = %request.username, "authentication failed: unknown username");
        log_failure(persistence, &request.username, "unknown username", now)?;
        return Err(ApiError::AuthenticationFailed {
            reason: String::from(BAD_CREDENTIALS),
        });
    };

    let verified: bool =
        bcrypt::verify(&request.password, &credentials.password_hash).map_err(|e| {
            ApiError::Internal {
                message: format!("Password verification failed: {e}"),
            }
        })?;
    if !verified {
        warn!(username = %request.username, "authentication failed: wrong password");
        log_failure(persistence, &request.username, "wrong password", now)?;
        return Err(ApiError::AuthenticationFailed {
            reason: String::from(BAD_CREDENTIALS),
        });
    }

    let account: UserAccount = credentials
        .to_account()
        .map_err(translate_persistence_error)?;
    info!(username = %account.username, user_id = account.id, "authentication succeeded");
    let details: String = json!({ "username": account.username, "user_id": account.id }).to_string();
    persistence
        .append_log(&SystemEvent::new(
            LogLevel::Info,
            tags::AUTH_SUCCESS,
            details,
            now,
        ))
        .map_err(translate_persistence_error)?;

    Ok(AuthResponse {
        id: account.id,
        username: account.username,
        role: account.role,
    })
}

/// Ensures the given user exists and holds the admin role.
///
/// # Errors
///
/// Returns `Unauthorized` if the user is missing or not an admin.
pub fn require_admin(
    persistence: &mut Persistence,
    user_id: i64,
    action: &str,
) -> Result<UserAccount, ApiError> {
    let account: Option<UserAccount> = persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    match account {
        Some(account) if account.role == Role::Admin => Ok(account),
        _ => Err(ApiError::Unauthorized {
            action: String::from(action),
            required_role: String::from("admin"),
        }),
    }
}
