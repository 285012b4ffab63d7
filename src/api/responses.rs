//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    labels::{Language, Translations},
    state::{Format, SessionExpired, SessionKind, SessionSnapshot, SessionSpec},
};

/// Body of POST /format
#[derive(Debug, Clone, Deserialize)]
pub struct FormatRequest {
    pub format: String,
}

/// Body of POST /sessions
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsRequest {
    pub total: i64,
}

/// Body of POST /session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub kind: String,
}

/// Query string of GET /labels
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsQuery {
    pub lang: Option<String>,
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Successful command; status mirrors whether the timer is running
    pub fn ok(message: String, session: SessionSnapshot) -> Self {
        let status = if session.running { "running" } else { "paused" };
        Self::new(status.to_string(), message, session)
    }

    /// Create an error response carrying the unchanged session
    pub fn error(message: String, session: SessionSnapshot) -> Self {
        Self::new("error".to_string(), message, session)
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub last_expired: Option<SessionExpired>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLabel {
    pub kind: SessionKind,
    pub label: String,
    pub duration_seconds: u64,
}

/// Localized text for the current format
#[derive(Debug, Clone, Serialize)]
pub struct LabelsResponse {
    pub language: Language,
    pub format: Format,
    pub translations: &'static Translations,
    pub sessions: Vec<SessionLabel>,
}

impl LabelsResponse {
    pub fn new(language: Language, format: Format) -> Self {
        let translations = language.translations();
        let sessions = SessionKind::ALL
            .iter()
            .map(|&kind| SessionLabel {
                kind,
                label: translations.session_label(format, kind),
                duration_seconds: format.duration(kind),
            })
            .collect();

        Self {
            language,
            format,
            translations,
            sessions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatEntry {
    pub format: Format,
    pub sessions: [SessionSpec; 3],
}

/// Every known format with its durations
#[derive(Debug, Clone, Serialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatEntry>,
}

impl FormatsResponse {
    pub fn all() -> Self {
        Self {
            formats: Format::ALL
                .iter()
                .map(|&format| FormatEntry {
                    format,
                    sessions: format.specs(),
                })
                .collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
