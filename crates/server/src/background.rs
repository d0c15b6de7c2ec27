// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Periodic maintenance tasks.
//!
//! Two loops run for the life of the process: the sweeper cancels
//! unclaimed bookings whose grace window expired, and the lot monitor
//! recomputes the advisory full/available status. Both stop promptly
//! when the shutdown token fires.

use parkd_domain::{LotStatus, now_utc};
use parkd_persistence::Persistence;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// How often the sweeper scans for expired unclaimed bookings.
pub const AUTO_CANCEL_INTERVAL: Duration = Duration::from_secs(30);

/// How often the lot monitor recomputes availability.
pub const LOT_STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Spawns the auto-cancel sweeper loop.
pub fn spawn_auto_cancel(
    persistence: Arc<Mutex<Persistence>>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(AUTO_CANCEL_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("auto-cancel sweeper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let mut store = persistence.lock().await;
                    match store.auto_cancel_expired(now_utc()) {
                        Ok(swept) if swept.is_empty() => {}
                        Ok(swept) => {
                            info!(count = swept.len(), "auto-cancelled unclaimed bookings");
                        }
                        Err(err) => error!(error = %err, "auto-cancel sweep failed"),
                    }
                }
            }
        }
    })
}

/// Spawns the lot status monitor loop.
pub fn spawn_lot_monitor(
    persistence: Arc<Mutex<Persistence>>,
    lot_status: Arc<Mutex<LotStatus>>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LOT_STATUS_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("lot status monitor stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let free: i64 = {
                        let mut store = persistence.lock().await;
                        match store.free_slot_count() {
                            Ok(free) => free,
                            Err(err) => {
                                error!(error = %err, "lot status scan failed");
                                continue;
                            }
                        }
                    };
                    let next: LotStatus =
                        LotStatus::from_free_count(usize::try_from(free).unwrap_or(0));
                    let mut current = lot_status.lock().await;
                    if *current != next {
                        info!(from = %current.as_str(), to = %next.as_str(), "lot status changed");
                        *current = next;
                    }
                }
            }
        }
    })
}
