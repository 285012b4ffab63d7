//! Session expiry notification background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    services::{run_notify_command, NotifyCommand},
    state::AppState,
};

/// Background task that delivers the notification for every expired session
pub async fn expiry_notifier_task(state: Arc<AppState>, command: Option<NotifyCommand>) {
    info!("Starting expiry notifier task");

    let mut expired_rx = state.subscribe_expired();

    loop {
        match expired_rx.recv().await {
            Ok(expired) => {
                info!(
                    "Session expired: {} -> {} ({} completed)",
                    expired.finished, expired.next, expired.completed_count
                );

                if let Some(command) = &command {
                    if let Err(e) = run_notify_command(command, &expired).await {
                        warn!("Notification command failed: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Expiry notifier fell behind, skipped {} notifications", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Expiry channel closed, stopping notifier");
                break;
            }
        }
    }
}
