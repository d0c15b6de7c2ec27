// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::Role;
use parkd_events::tags;
use parkd_persistence::Persistence;

use crate::auth::{authenticate, require_admin};
use crate::error::ApiError;
use crate::request_response::AuthRequest;
use crate::tests::helpers::{T0, admin_id, consumer_id, store};

fn login(persistence: &mut Persistence, username: &str, password: &str) -> Result<crate::request_response::AuthResponse, ApiError> {
    authenticate(
        persistence,
        &AuthRequest {
            username: String::from(username),
            password: String::from(password),
        },
        T0,
    )
}

#[test]
fn valid_credentials_return_the_account() {
    let mut persistence = store();

    let response = login(&mut persistence, "user1", "user123").expect("login should succeed");

    assert_eq!(response.username, "user1");
    assert_eq!(response.role, Role::Consumer);
    assert_eq!(
        persistence
            .logs_for_event(tags::AUTH_SUCCESS)
            .expect("logs")
            .len(),
        1
    );
}

#[test]
fn admin_credentials_carry_the_admin_role() {
    let mut persistence = store();
    let response = login(&mut persistence, "admin", "admin123").expect("login should succeed");
    assert_eq!(response.role, Role::Admin);
}

#[test]
fn wrong_password_is_rejected_and_logged() {
    let mut persistence = store();

    let err = login(&mut persistence, "user1", "wrong").expect_err("login must fail");

    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
    let logs = persistence.logs_for_event(tags::AUTH_FAILURE).expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].level, "WARN");
}

#[test]
fn unknown_user_gets_the_same_rejection_message() {
    let mut persistence = store();

    let unknown = login(&mut persistence, "nobody", "user123").expect_err("login must fail");
    let wrong = login(&mut persistence, "user1", "wrong").expect_err("login must fail");

    // The two failures are indistinguishable to the caller.
    assert_eq!(unknown, wrong);
}

#[test]
fn require_admin_accepts_the_admin_account() {
    let mut persistence = store();
    let id = admin_id(&mut persistence);
    let account = require_admin(&mut persistence, id, "test").expect("admin should pass");
    assert_eq!(account.role, Role::Admin);
}

#[test]
fn require_admin_rejects_consumers_and_unknown_users() {
    let mut persistence = store();
    let id = consumer_id(&mut persistence);

    let err = require_admin(&mut persistence, id, "test").expect_err("consumer must fail");
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err = require_admin(&mut persistence, 9999, "test").expect_err("unknown must fail");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
