// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared gate actuation with timer-driven auto-close.
//!
//! Gate state is transient and lives only in this process; both gates
//! are closed at startup. Each open schedules its own close task, and
//! the generation counter inside [`GateBank`] makes a re-open refresh
//! the deadline instead of stacking closes.

use parkd_core::GateBank;
use parkd_domain::{GateId, now_utc};
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Handle to the process-wide gate bank.
#[derive(Clone)]
pub struct SharedGates {
    bank: Arc<Mutex<GateBank>>,
}

impl SharedGates {
    /// Creates the bank with both gates closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bank: Arc::new(Mutex::new(GateBank::new())),
        }
    }

    /// Opens a gate for `open_seconds` and schedules its auto-close.
    ///
    /// Re-opening a gate that is already open pushes the deadline out;
    /// the superseded close task expires without effect.
    pub async fn open(&self, gate: GateId, open_seconds: i64) {
        let generation: u64 = {
            let mut bank = self.bank.lock().await;
            bank.open(gate, Duration::seconds(open_seconds), now_utc())
        };
        debug!(gate = %gate, open_seconds, generation, "gate opened");

        let bank: Arc<Mutex<GateBank>> = Arc::clone(&self.bank);
        let sleep: std::time::Duration =
            std::time::Duration::from_secs(u64::try_from(open_seconds).unwrap_or(0));
        tokio::spawn(async move {
            tokio::time::sleep(sleep).await;
            let mut bank = bank.lock().await;
            if bank.close_if_current(gate, generation) {
                debug!(gate = %gate, generation, "gate auto-closed");
            }
        });
    }

    /// Reads the current state of both gates.
    pub async fn snapshot(&self) -> parkd_core::GateSnapshot {
        self.bank.lock().await.snapshot(now_utc())
    }
}

impl Default for SharedGates {
    fn default() -> Self {
        Self::new()
    }
}
