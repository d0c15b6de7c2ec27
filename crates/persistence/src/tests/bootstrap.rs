// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkd_domain::{Role, SlotStatus};

use crate::tests::store;

#[test]
fn seeds_three_free_slots() {
    let mut persistence = store();
    let slots = persistence.list_slots().expect("list should succeed");

    let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
    assert!(slots.iter().all(|s| s.status == SlotStatus::Free));
    assert!(slots.iter().all(|s| s.category == "General"));
}

#[test]
fn seeds_admin_and_consumer_accounts() {
    let mut persistence = store();

    let admin = persistence
        .find_user_by_username("admin")
        .expect("query should succeed")
        .expect("admin is seeded");
    assert_eq!(
        admin.to_account().expect("role parses").role,
        Role::Admin
    );
    assert!(bcrypt::verify("admin123", &admin.password_hash).expect("hash is valid"));

    let consumer = persistence
        .find_user_by_username("user1")
        .expect("query should succeed")
        .expect("user1 is seeded");
    assert_eq!(
        consumer.to_account().expect("role parses").role,
        Role::Consumer
    );
}

#[test]
fn unknown_username_is_absent_not_an_error() {
    let mut persistence = store();
    assert!(
        persistence
            .find_user_by_username("nobody")
            .expect("query should succeed")
            .is_none()
    );
}

#[test]
fn in_memory_databases_are_isolated() {
    let mut first = store();
    let mut second = store();

    let user_id = crate::tests::consumer_id(&mut first);
    let start = crate::tests::T0;
    first
        .create_booking(
            user_id,
            "S1",
            start,
            start + time::Duration::hours(1),
            None,
            None,
            start,
        )
        .expect("booking in first store");

    assert!(second.list_bookings().expect("list").is_empty());
}
