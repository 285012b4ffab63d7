//! Pomodoro formats and the session kinds they define

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// The three kinds of session every format defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub const ALL: [SessionKind; 3] = [Self::Pomodoro, Self::ShortBreak, Self::LongBreak];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pomodoro" => Ok(Self::Pomodoro),
            // Older clients send the space-separated spellings
            "short_break" | "short break" => Ok(Self::ShortBreak),
            "long_break" | "long break" => Ok(Self::LongBreak),
            other => Err(SessionError::InvalidSessionKind(other.to_string())),
        }
    }
}

/// Duration record for one session kind within a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSpec {
    pub kind: SessionKind,
    pub duration_seconds: u64,
}

impl SessionSpec {
    pub fn minutes(&self) -> u64 {
        self.duration_seconds / 60
    }
}

/// A named focus/break pairing selectable by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Format {
    #[default]
    #[serde(rename = "25+5")]
    Short,
    #[serde(rename = "50+10")]
    Long,
}

impl Format {
    pub const ALL: [Format; 2] = [Self::Short, Self::Long];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "25+5",
            Self::Long => "50+10",
        }
    }

    /// Duration of `kind` under this format, in whole seconds
    pub const fn duration(&self, kind: SessionKind) -> u64 {
        let minutes = match (self, kind) {
            (Self::Short, SessionKind::Pomodoro) => 25,
            (Self::Short, SessionKind::ShortBreak) => 5,
            (Self::Short, SessionKind::LongBreak) => 15,
            (Self::Long, SessionKind::Pomodoro) => 50,
            (Self::Long, SessionKind::ShortBreak) => 10,
            (Self::Long, SessionKind::LongBreak) => 30,
        };
        minutes * 60
    }

    pub fn spec(&self, kind: SessionKind) -> SessionSpec {
        SessionSpec {
            kind,
            duration_seconds: self.duration(kind),
        }
    }

    pub fn specs(&self) -> [SessionSpec; 3] {
        SessionKind::ALL.map(|kind| self.spec(kind))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "25+5" => Ok(Self::Short),
            "50+10" => Ok(Self::Long),
            other => Err(SessionError::InvalidFormat(other.to_string())),
        }
    }
}
