// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-gate open/closed state with auto-close deadlines.
//!
//! Gate state is process-local and never persisted; both gates are
//! closed at construction. Re-opening an already-open gate refreshes the
//! close deadline, never stacks it: each `open` bumps a generation
//! counter, and a close request is honored only if its generation is
//! still current. A gate is also considered closed once its deadline has
//! passed, so a reader never observes a stale `open` even if the timer
//! task lags.

use parkd_domain::{GateId, GateState};
use time::{Duration, OffsetDateTime};

/// How long a gate stays open for a routine grant.
pub const GATE_OPEN_DURATION: Duration = Duration::seconds(10);

/// How long a gate stays open for an emergency open.
pub const EMERGENCY_OPEN_DURATION: Duration = Duration::seconds(15);

/// The observable state of both gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
    /// Entrance gate state.
    pub entrance: GateState,
    /// Exit gate state.
    pub exit: GateState,
}

/// One gate's bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
struct GateCell {
    /// Pending auto-close deadline; `None` means closed.
    open_until: Option<OffsetDateTime>,
    /// Bumped on every open so a superseded close request is a no-op.
    generation: u64,
}

/// The transient state store for both physical gates.
#[derive(Debug, Clone, Default)]
pub struct GateBank {
    entrance: GateCell,
    exit: GateCell,
}

impl GateBank {
    /// Creates a gate bank with both gates closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, gate: GateId) -> &GateCell {
        match gate {
            GateId::Entrance => &self.entrance,
            GateId::Exit => &self.exit,
        }
    }

    fn cell_mut(&mut self, gate: GateId) -> &mut GateCell {
        match gate {
            GateId::Entrance => &mut self.entrance,
            GateId::Exit => &mut self.exit,
        }
    }

    /// Opens a gate until `now + duration`, superseding any pending
    /// close deadline.
    ///
    /// Returns the generation the caller's auto-close timer must present
    /// to [`Self::close_if_current`].
    pub fn open(&mut self, gate: GateId, duration: Duration, now: OffsetDateTime) -> u64 {
        let cell: &mut GateCell = self.cell_mut(gate);
        cell.open_until = Some(now + duration);
        cell.generation += 1;
        cell.generation
    }

    /// Closes a gate if `generation` is still the latest open.
    ///
    /// Returns true if the gate was closed by this call; false if a
    /// newer open superseded the request.
    pub fn close_if_current(&mut self, gate: GateId, generation: u64) -> bool {
        let cell: &mut GateCell = self.cell_mut(gate);
        if cell.generation == generation {
            cell.open_until = None;
            true
        } else {
            false
        }
    }

    /// The state of one gate as of `now`.
    #[must_use]
    pub fn state(&self, gate: GateId, now: OffsetDateTime) -> GateState {
        match self.cell(gate).open_until {
            Some(deadline) if now < deadline => GateState::Open,
            _ => GateState::Closed,
        }
    }

    /// The state of both gates as of `now`.
    #[must_use]
    pub fn snapshot(&self, now: OffsetDateTime) -> GateSnapshot {
        GateSnapshot {
            entrance: self.state(GateId::Entrance, now),
            exit: self.state(GateId::Exit, now),
        }
    }
}
