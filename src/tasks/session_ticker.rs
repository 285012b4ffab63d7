//! One-second scheduler driving the session countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that ticks the session while it is running.
///
/// The interval exists only while the published snapshot says `running`; pause,
/// reset and expiry all drop it, and a later start arms a fresh one. A pause and
/// start that land between two polls still re-arm, since the snapshot then carries a
/// new run generation. There is never more than one interval alive.
pub async fn session_ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting session ticker task ({}ms period)", period.as_millis());

    let mut snapshot_rx = state.snapshot_tx.subscribe();

    loop {
        // Wait for the timer to be started
        let armed = snapshot_rx
            .wait_for(|snapshot| snapshot.running)
            .await
            .map(|snapshot| snapshot.run_generation);
        let armed_generation = match armed {
            Ok(generation) => generation,
            Err(_) => {
                info!("Snapshot channel closed, stopping session ticker");
                return;
            }
        };

        debug!("Timer running (run {}), arming ticker", armed_generation);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(snapshot) if !snapshot.running => {
                            debug!("Session expired, disarming ticker");
                            break;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to tick session: {}", e);
                        }
                    }
                }

                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        info!("Snapshot channel closed, stopping session ticker");
                        return;
                    }
                    let (running, generation) = {
                        let snapshot = snapshot_rx.borrow_and_update();
                        (snapshot.running, snapshot.run_generation)
                    };
                    if !running {
                        debug!("Timer stopped, disarming ticker");
                        break;
                    }
                    if generation != armed_generation {
                        debug!("Timer restarted (run {}), re-arming ticker", generation);
                        break;
                    }
                }
            }
        }
    }
}
