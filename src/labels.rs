//! Localized UI text
//!
//! Static translation table for the supported interface languages. Session labels
//! combine the kind name with the minutes of the active format, e.g.
//! `Focus Time (25 min)`.

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::{
    error::SessionError,
    state::{Format, SessionKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
    Uz,
}

impl Language {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
            Self::Uz => "uz",
        }
    }

    pub fn translations(&self) -> &'static Translations {
        match self {
            Self::En => &EN,
            Self::Ko => &KO,
            Self::Uz => &UZ,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            "uz" => Ok(Self::Uz),
            _ => Err(SessionError::InvalidLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub title: &'static str,
    pub focus_time: &'static str,
    pub short_break: &'static str,
    pub long_break: &'static str,
    pub session: &'static str,
    pub sessions: &'static str,
    pub progress: &'static str,
    pub start: &'static str,
    pub pause: &'static str,
    pub reset: &'static str,
    pub play_music: &'static str,
    pub now_playing: &'static str,
    pub min: &'static str,
    pub info: &'static str,
}

impl Translations {
    pub fn kind_name(&self, kind: SessionKind) -> &'static str {
        match kind {
            SessionKind::Pomodoro => self.focus_time,
            SessionKind::ShortBreak => self.short_break,
            SessionKind::LongBreak => self.long_break,
        }
    }

    /// Label such as `Short Break (5 min)` for `kind` under `format`
    pub fn session_label(&self, format: Format, kind: SessionKind) -> String {
        format!(
            "{} ({} {})",
            self.kind_name(kind),
            format.spec(kind).minutes(),
            self.min
        )
    }
}

static EN: Translations = Translations {
    title: "Study With Me",
    focus_time: "Focus Time",
    short_break: "Short Break",
    long_break: "Long Break",
    session: "Session",
    sessions: "Sessions",
    progress: "Progress",
    start: "Start",
    pause: "Pause",
    reset: "Reset",
    play_music: "Play Music",
    now_playing: "Now Playing",
    min: "min",
    info: "Info",
};

static KO: Translations = Translations {
    title: "함께 공부해요",
    focus_time: "집중 시간",
    short_break: "짧은 휴식",
    long_break: "긴 휴식",
    session: "세션",
    sessions: "세션",
    progress: "진행 상황",
    start: "시작",
    pause: "일시정지",
    reset: "재설정",
    play_music: "음악 재생",
    now_playing: "재생 중",
    min: "분",
    info: "정보",
};

static UZ: Translations = Translations {
    title: "Men bilan o'qing",
    focus_time: "Diqqat vaqti",
    short_break: "Qisqa tanaffus",
    long_break: "Uzoq tanaffus",
    session: "Sessiya",
    sessions: "Sessiyalar",
    progress: "Progress",
    start: "Boshlash",
    pause: "To'xtatish",
    reset: "Qayta o'rnatish",
    play_music: "Musiqa qo'yish",
    now_playing: "Hozir ijro",
    min: "daq",
    info: "Ma'lumot",
};
