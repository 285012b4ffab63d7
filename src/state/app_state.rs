//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Format, SessionExpired, SessionKind, SessionSnapshot, SessionState};
use crate::{
    error::{CommandError, SessionError},
    utils::format_uptime,
};

/// Shared application state owning the single session controller
#[derive(Debug)]
pub struct AppState {
    /// The timer state machine
    pub session: Arc<Mutex<SessionState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub last_expired: Arc<Mutex<Option<SessionExpired>>>,
    /// Published after every mutation; the ticker watches `running` on it
    pub snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<SessionSnapshot>,
    /// Fired once per expiry transition
    pub expired_tx: broadcast::Sender<SessionExpired>,
}

impl AppState {
    /// Create a new AppState around a fresh, paused session
    pub fn new(port: u16, host: String, session: SessionState) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let (expired_tx, _) = broadcast::channel(16);

        Self {
            session: Arc::new(Mutex::new(session)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            last_expired: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            expired_tx,
        }
    }

    /// Apply `updater` under the session lock and publish the resulting snapshot.
    ///
    /// `action` is recorded as the last user action when given; scheduler ticks
    /// pass `None`.
    fn update_session<F, R>(
        &self,
        action: Option<&str>,
        updater: F,
    ) -> Result<(SessionSnapshot, R), CommandError>
    where
        F: FnOnce(&mut SessionState) -> Result<R, SessionError>,
    {
        let mut session = self.session.lock()
            .map_err(|e| CommandError::Internal(format!("Failed to lock session state: {}", e)))?;

        let outcome = updater(&mut *session)?;
        let snapshot = session.snapshot();
        drop(session); // Release the lock early

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        // Notify snapshot watchers (this arms or disarms the ticker)
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to publish session snapshot: {}", e);
        }

        Ok((snapshot, outcome))
    }

    pub fn start(&self) -> Result<SessionSnapshot, CommandError> {
        info!("Starting timer");
        self.update_session(Some("start"), |s| {
            s.start();
            Ok(())
        })
        .map(|(snapshot, _)| snapshot)
    }

    pub fn pause(&self) -> Result<SessionSnapshot, CommandError> {
        info!("Pausing timer");
        self.update_session(Some("pause"), |s| {
            s.pause();
            Ok(())
        })
        .map(|(snapshot, _)| snapshot)
    }

    pub fn reset(&self) -> Result<SessionSnapshot, CommandError> {
        info!("Resetting timer");
        self.update_session(Some("reset"), |s| {
            s.reset();
            Ok(())
        })
        .map(|(snapshot, _)| snapshot)
    }

    pub fn set_format(&self, format: &str) -> Result<SessionSnapshot, CommandError> {
        let format: Format = format.parse()?;
        info!("Setting format to: {}", format);
        self.update_session(Some("format"), |s| {
            s.set_format(format);
            Ok(())
        })
        .map(|(snapshot, _)| snapshot)
    }

    pub fn set_total_sessions(&self, total: i64) -> Result<SessionSnapshot, CommandError> {
        info!("Setting total sessions to: {}", total);
        self.update_session(Some("sessions"), |s| s.set_total_sessions(total))
            .map(|(snapshot, _)| snapshot)
    }

    pub fn select_session(&self, kind: &str) -> Result<SessionSnapshot, CommandError> {
        let kind: SessionKind = kind.parse()?;
        info!("Selecting session: {}", kind);
        self.update_session(Some("session"), |s| {
            s.select_session(kind);
            Ok(())
        })
        .map(|(snapshot, _)| snapshot)
    }

    /// Advance the timer by one second and deliver the expiry signal if the
    /// session finished
    pub fn tick(&self) -> Result<SessionSnapshot, CommandError> {
        let (snapshot, expired) = self.update_session(None, |s| Ok(s.tick()))?;

        if let Some(expired) = expired {
            if let Ok(mut last) = self.last_expired.lock() {
                *last = Some(expired.clone());
            }
            if let Err(e) = self.expired_tx.send(expired) {
                debug!("No listeners for session expiry: {}", e);
            }
        }

        Ok(snapshot)
    }

    /// Get current session snapshot
    pub fn get_snapshot(&self) -> Result<SessionSnapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock session state: {}", e))
    }

    pub fn get_format(&self) -> Result<Format, String> {
        self.get_snapshot().map(|snapshot| snapshot.format)
    }

    /// Subscribe to session expiry signals
    pub fn subscribe_expired(&self) -> broadcast::Receiver<SessionExpired> {
        self.expired_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    pub fn get_last_expired(&self) -> Option<SessionExpired> {
        self.last_expired.lock().ok().and_then(|e| e.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), SessionState::default())
    }

    #[test]
    fn commands_publish_snapshots() {
        let state = app_state();
        let rx = state.snapshot_tx.subscribe();

        state.start().unwrap();
        assert!(rx.borrow().running);

        state.select_session("long break").unwrap();
        assert!(!rx.borrow().running);
        assert_eq!(rx.borrow().kind, SessionKind::LongBreak);
    }

    #[test]
    fn rejected_commands_leave_state_unchanged() {
        let state = app_state();
        state.start().unwrap();
        let before = state.get_snapshot().unwrap();

        assert!(matches!(
            state.set_format("90+30"),
            Err(CommandError::Rejected(SessionError::InvalidFormat(_)))
        ));
        assert!(matches!(
            state.set_total_sessions(5),
            Err(CommandError::Rejected(SessionError::InvalidSessionCount(5)))
        ));
        assert!(matches!(
            state.select_session("nap"),
            Err(CommandError::Rejected(SessionError::InvalidSessionKind(_)))
        ));
        assert_eq!(state.get_snapshot().unwrap(), before);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn expiry_is_broadcast_and_remembered() {
        let state = AppState::new(
            0,
            "127.0.0.1".to_string(),
            SessionState::new(Format::Short, 1).unwrap(),
        );
        let mut rx = state.subscribe_expired();

        state.start().unwrap();
        for _ in 0..25 * 60 {
            state.tick().unwrap();
        }
        assert!(rx.try_recv().is_err());

        let snapshot = state.tick().unwrap();
        assert_eq!(snapshot.kind, SessionKind::LongBreak);
        assert!(!snapshot.running);

        let expired = rx.try_recv().unwrap();
        assert_eq!(expired.finished, SessionKind::Pomodoro);
        assert_eq!(expired.next, SessionKind::LongBreak);
        assert_eq!(state.get_last_expired(), Some(expired));
    }

    #[test]
    fn ticks_are_not_recorded_as_actions() {
        let state = app_state();
        state.tick().unwrap();
        assert_eq!(state.get_last_action(), (None, None));
    }
}
