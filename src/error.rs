//! Validation errors raised by session commands

use thiserror::Error;

/// Rejected command input. The session state is left untouched whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown pomodoro format: {0:?} (expected \"25+5\" or \"50+10\")")]
    InvalidFormat(String),

    #[error("session count {0} is out of range (expected 1 to 4)")]
    InvalidSessionCount(i64),

    #[error("unknown session kind: {0:?}")]
    InvalidSessionKind(String),

    #[error("unsupported language: {0:?} (expected en, ko or uz)")]
    InvalidLanguage(String),
}

/// Failure of a command issued through [`crate::state::AppState`]
#[derive(Error, Debug)]
pub enum CommandError {
    /// The input was invalid; nothing changed
    #[error(transparent)]
    Rejected(#[from] SessionError),

    #[error("{0}")]
    Internal(String),
}
