// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::T0;
use crate::{EMERGENCY_OPEN_DURATION, GATE_OPEN_DURATION, GateBank};
use parkd_domain::{GateId, GateState};
use time::Duration;

#[test]
fn gates_start_closed() {
    let bank = GateBank::new();
    let snapshot = bank.snapshot(T0);
    assert_eq!(snapshot.entrance, GateState::Closed);
    assert_eq!(snapshot.exit, GateState::Closed);
}

#[test]
fn open_gate_reads_open_until_its_deadline() {
    let mut bank = GateBank::new();
    bank.open(GateId::Entrance, GATE_OPEN_DURATION, T0);

    assert_eq!(bank.state(GateId::Entrance, T0), GateState::Open);
    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(9)),
        GateState::Open
    );
    // The deadline itself is already closed.
    assert_eq!(
        bank.state(GateId::Entrance, T0 + GATE_OPEN_DURATION),
        GateState::Closed
    );
}

#[test]
fn gates_are_independent() {
    let mut bank = GateBank::new();
    bank.open(GateId::Exit, GATE_OPEN_DURATION, T0);

    assert_eq!(bank.state(GateId::Entrance, T0), GateState::Closed);
    assert_eq!(bank.state(GateId::Exit, T0), GateState::Open);
}

#[test]
fn reopening_refreshes_the_deadline_instead_of_stacking() {
    let mut bank = GateBank::new();
    bank.open(GateId::Entrance, GATE_OPEN_DURATION, T0);
    bank.open(GateId::Entrance, GATE_OPEN_DURATION, T0 + Duration::seconds(5));

    // Open from the second grant, not closed at the first deadline.
    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(12)),
        GateState::Open
    );
    // Closed 10s after the second grant.
    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(15)),
        GateState::Closed
    );
}

#[test]
fn stale_close_request_is_ignored() {
    let mut bank = GateBank::new();
    let first = bank.open(GateId::Entrance, GATE_OPEN_DURATION, T0);
    let _second = bank.open(GateId::Entrance, GATE_OPEN_DURATION, T0 + Duration::seconds(5));

    assert!(!bank.close_if_current(GateId::Entrance, first));
    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(6)),
        GateState::Open
    );
}

#[test]
fn current_close_request_closes_the_gate() {
    let mut bank = GateBank::new();
    let generation = bank.open(GateId::Exit, GATE_OPEN_DURATION, T0);

    assert!(bank.close_if_current(GateId::Exit, generation));
    assert_eq!(bank.state(GateId::Exit, T0 + Duration::seconds(1)), GateState::Closed);
}

#[test]
fn emergency_open_holds_longer_than_a_routine_grant() {
    let mut bank = GateBank::new();
    bank.open(GateId::Entrance, EMERGENCY_OPEN_DURATION, T0);

    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(14)),
        GateState::Open
    );
    assert_eq!(
        bank.state(GateId::Entrance, T0 + Duration::seconds(15)),
        GateState::Closed
    );
}
