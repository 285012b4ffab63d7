//! Pomodoro session state machine
//!
//! `SessionState` holds everything the timer needs and is mutated only through the
//! command methods below. None of them perform I/O; the one side effect of the
//! machine, a finished session, is returned from [`SessionState::tick`] as a
//! [`SessionExpired`] signal for the caller to deliver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Format, SessionKind};
use crate::{error::SessionError, utils::format_clock};

pub const DEFAULT_TOTAL_SESSIONS: u32 = 2;
pub const MAX_TOTAL_SESSIONS: u32 = 4;

/// Signal emitted when a countdown is consumed at zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExpired {
    /// Kind of the session that just finished
    pub finished: SessionKind,
    /// Kind the timer switched to
    pub next: SessionKind,
    pub completed_count: u32,
    pub at: DateTime<Utc>,
}

/// Read-only view of the timer handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub kind: SessionKind,
    pub remaining_seconds: u64,
    pub running: bool,
    pub is_break: bool,
    pub completed_count: u32,
    pub total_sessions: u32,
    pub format: Format,
    /// `MM:SS` rendering of `remaining_seconds`
    pub display: String,
    /// Bumped each time the timer goes from paused to running
    #[serde(skip)]
    pub run_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    kind: SessionKind,
    remaining_seconds: u64,
    running: bool,
    run_generation: u64,
    completed_count: u32,
    total_sessions: u32,
    format: Format,
}

impl SessionState {
    /// Fresh timer: paused at the start of a full pomodoro
    pub fn new(format: Format, total_sessions: u32) -> Result<Self, SessionError> {
        validate_total_sessions(i64::from(total_sessions))?;
        Ok(Self {
            kind: SessionKind::Pomodoro,
            remaining_seconds: format.duration(SessionKind::Pomodoro),
            running: false,
            run_generation: 0,
            completed_count: 0,
            total_sessions,
            format,
        })
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn total_sessions(&self) -> u32 {
        self.total_sessions
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            kind: self.kind,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            is_break: self.kind.is_break(),
            completed_count: self.completed_count,
            total_sessions: self.total_sessions,
            format: self.format,
            display: format_clock(self.remaining_seconds),
            run_generation: self.run_generation,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.run_generation += 1;
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Back to a paused, full pomodoro with no completed sessions. Format and
    /// session target are kept.
    pub fn reset(&mut self) {
        self.completed_count = 0;
        self.load(SessionKind::Pomodoro);
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
        self.reset();
    }

    /// Changes the session target and clears the completed count. The countdown
    /// itself is left alone.
    pub fn set_total_sessions(&mut self, total: i64) -> Result<(), SessionError> {
        self.total_sessions = validate_total_sessions(total)?;
        self.completed_count = 0;
        Ok(())
    }

    pub fn select_session(&mut self, kind: SessionKind) {
        self.load(kind);
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while paused. A tick that finds the countdown already at zero
    /// runs the expiry transition instead of decrementing, and returns the signal
    /// describing it.
    pub fn tick(&mut self) -> Option<SessionExpired> {
        if !self.running {
            return None;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            debug!("{} tick, {} remaining", self.kind, format_clock(self.remaining_seconds));
            return None;
        }

        Some(self.expire())
    }

    fn expire(&mut self) -> SessionExpired {
        let finished = self.kind;
        let next = match finished {
            SessionKind::Pomodoro => {
                self.completed_count += 1;
                if self.completed_count >= self.total_sessions {
                    SessionKind::LongBreak
                } else {
                    SessionKind::ShortBreak
                }
            }
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Pomodoro,
        };

        self.load(next);
        info!(
            "{} finished ({}/{} sessions), switching to {}",
            finished, self.completed_count, self.total_sessions, next
        );

        SessionExpired {
            finished,
            next,
            completed_count: self.completed_count,
            at: Utc::now(),
        }
    }

    /// Stop and load the full duration of `kind`
    fn load(&mut self, kind: SessionKind) {
        self.running = false;
        self.kind = kind;
        self.remaining_seconds = self.format.duration(kind);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            kind: SessionKind::Pomodoro,
            remaining_seconds: Format::default().duration(SessionKind::Pomodoro),
            running: false,
            run_generation: 0,
            completed_count: 0,
            total_sessions: DEFAULT_TOTAL_SESSIONS,
            format: Format::default(),
        }
    }
}

fn validate_total_sessions(total: i64) -> Result<u32, SessionError> {
    match u32::try_from(total) {
        Ok(n) if (1..=MAX_TOTAL_SESSIONS).contains(&n) => Ok(n),
        _ => Err(SessionError::InvalidSessionCount(total)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_at(kind: SessionKind, remaining: u64, total: u32) -> SessionState {
        let mut state = SessionState::new(Format::Short, total).unwrap();
        state.select_session(kind);
        state.remaining_seconds = remaining;
        state.start();
        state
    }

    #[test]
    fn starts_paused_on_a_full_pomodoro() {
        let state = SessionState::default();
        assert_eq!(state.kind(), SessionKind::Pomodoro);
        assert_eq!(state.remaining_seconds(), 25 * 60);
        assert!(!state.is_running());
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.total_sessions(), 2);
        assert_eq!(state.format(), Format::Short);
    }

    #[test]
    fn select_session_loads_full_duration_for_every_format() {
        for format in Format::ALL {
            for kind in SessionKind::ALL {
                let mut state = SessionState::default();
                state.set_format(format);
                state.start();
                state.select_session(kind);
                assert_eq!(state.remaining_seconds(), format.duration(kind));
                assert!(!state.is_running());
                assert_eq!(state.kind(), kind);
            }
        }
    }

    #[test]
    fn tick_while_paused_changes_nothing() {
        let mut state = SessionState::default();
        state.remaining_seconds = 0;
        let before = state.clone();

        assert_eq!(state.tick(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn start_is_idempotent() {
        let mut once = SessionState::default();
        once.start();
        let mut twice = SessionState::default();
        twice.start();
        twice.start();
        assert_eq!(once, twice);
    }

    #[test]
    fn tick_counts_down_by_one_second() {
        let mut state = SessionState::default();
        state.start();
        assert_eq!(state.tick(), None);
        assert_eq!(state.remaining_seconds(), 25 * 60 - 1);
        assert!(state.is_running());
    }

    #[test]
    fn pause_freezes_the_countdown() {
        let mut state = running_at(SessionKind::Pomodoro, 100, 2);
        state.tick();
        state.pause();
        state.tick();
        state.tick();
        assert_eq!(state.remaining_seconds(), 99);
    }

    #[test]
    fn pomodoro_expiry_moves_to_short_break() {
        let mut state = running_at(SessionKind::Pomodoro, 1, 2);

        assert_eq!(state.tick(), None);
        assert_eq!(state.remaining_seconds(), 0);
        assert!(state.is_running());

        let signal = state.tick().expect("expiry signal");
        assert_eq!(signal.finished, SessionKind::Pomodoro);
        assert_eq!(signal.next, SessionKind::ShortBreak);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.kind(), SessionKind::ShortBreak);
        assert_eq!(state.remaining_seconds(), 5 * 60);
        assert!(!state.is_running());
    }

    #[test]
    fn reaching_the_session_target_triggers_long_break() {
        let mut state = running_at(SessionKind::Pomodoro, 0, 1);

        let signal = state.tick().expect("expiry signal");
        assert_eq!(signal.next, SessionKind::LongBreak);
        assert_eq!(signal.completed_count, 1);
        assert_eq!(state.kind(), SessionKind::LongBreak);
        assert_eq!(state.remaining_seconds(), 15 * 60);
    }

    #[test]
    fn completing_past_the_target_still_takes_long_break() {
        let mut state = running_at(SessionKind::Pomodoro, 0, 1);
        state.completed_count = 3;

        state.tick();
        assert_eq!(state.completed_count(), 4);
        assert_eq!(state.kind(), SessionKind::LongBreak);
    }

    #[test]
    fn breaks_return_to_pomodoro_without_counting() {
        for kind in [SessionKind::ShortBreak, SessionKind::LongBreak] {
            let mut state = running_at(kind, 0, 2);
            state.completed_count = 1;

            let signal = state.tick().expect("expiry signal");
            assert_eq!(signal.next, SessionKind::Pomodoro);
            assert_eq!(state.kind(), SessionKind::Pomodoro);
            assert_eq!(state.remaining_seconds(), 25 * 60);
            assert_eq!(state.completed_count(), 1);
            assert!(!state.is_running());
        }
    }

    #[test]
    fn full_cycle_with_two_sessions() {
        let mut state = running_at(SessionKind::Pomodoro, 0, 2);
        let mut kinds = Vec::new();
        for _ in 0..4 {
            state.remaining_seconds = 0;
            state.start();
            kinds.push(state.tick().expect("expiry signal").next);
        }
        assert_eq!(
            kinds,
            [
                SessionKind::ShortBreak,
                SessionKind::Pomodoro,
                SessionKind::LongBreak,
                SessionKind::Pomodoro,
            ]
        );
        assert_eq!(state.completed_count(), 2);
    }

    #[test]
    fn reset_keeps_format_and_target() {
        let mut state = SessionState::new(Format::Long, 3).unwrap();
        state.select_session(SessionKind::ShortBreak);
        state.completed_count = 2;
        state.start();

        state.reset();
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.kind(), SessionKind::Pomodoro);
        assert!(!state.is_running());
        assert_eq!(state.remaining_seconds(), 50 * 60);
        assert_eq!(state.format(), Format::Long);
        assert_eq!(state.total_sessions(), 3);
    }

    #[test]
    fn set_format_restarts_on_the_new_pomodoro() {
        let mut state = running_at(SessionKind::LongBreak, 12, 2);
        state.completed_count = 2;

        state.set_format(Format::Long);
        assert_eq!(state.format(), Format::Long);
        assert_eq!(state.kind(), SessionKind::Pomodoro);
        assert_eq!(state.remaining_seconds(), 50 * 60);
        assert_eq!(state.completed_count(), 0);
        assert!(!state.is_running());
    }

    #[test]
    fn set_total_sessions_clears_count_but_not_countdown() {
        let mut state = running_at(SessionKind::ShortBreak, 42, 4);
        state.completed_count = 3;

        state.set_total_sessions(1).unwrap();
        assert_eq!(state.total_sessions(), 1);
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.kind(), SessionKind::ShortBreak);
        assert_eq!(state.remaining_seconds(), 42);
        assert!(state.is_running());
    }

    #[test]
    fn out_of_range_session_counts_are_rejected() {
        let mut state = SessionState::default();
        state.completed_count = 1;
        let before = state.clone();

        for bad in [5, 0, -1, i64::MAX] {
            assert_eq!(
                state.set_total_sessions(bad),
                Err(SessionError::InvalidSessionCount(bad))
            );
            assert_eq!(state, before);
        }
        assert!(SessionState::new(Format::Short, 0).is_err());
    }

    #[test]
    fn snapshot_renders_clock() {
        let mut state = SessionState::default();
        state.remaining_seconds = 65;
        let snapshot = state.snapshot();
        assert_eq!(snapshot.display, "01:05");
        assert_eq!(snapshot.remaining_seconds, 65);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["remainingSeconds"], 65);
        assert_eq!(json["format"], "25+5");
        assert_eq!(json["kind"], "pomodoro");
        assert_eq!(json["isBreak"], false);
        assert!(json.get("runGeneration").is_none());

        state.select_session(SessionKind::ShortBreak);
        assert!(state.snapshot().is_break);
    }

    #[test]
    fn resuming_bumps_the_run_generation_once() {
        let mut state = SessionState::default();
        state.start();
        state.start();
        assert_eq!(state.run_generation(), 1);

        state.pause();
        state.start();
        assert_eq!(state.run_generation(), 2);
        assert_eq!(state.snapshot().run_generation, 2);
    }
}
