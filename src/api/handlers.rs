//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    error::CommandError,
    labels::Language,
    state::{AppState, SessionSnapshot},
};
use super::responses::{
    ApiResponse, FormatRequest, FormatsResponse, HealthResponse, LabelsQuery, LabelsResponse,
    SessionRequest, SessionsRequest, StatusResponse,
};

/// Turn a command outcome into an HTTP response.
///
/// Rejected input answers 400 with the unchanged session so clients can re-render.
fn command_response(
    state: &AppState,
    message: &str,
    result: Result<SessionSnapshot, CommandError>,
) -> Response {
    match result {
        Ok(session) => {
            info!("{}", message);
            Json(ApiResponse::ok(message.to_string(), session)).into_response()
        }
        Err(CommandError::Rejected(e)) => {
            warn!("Rejected command: {}", e);
            match state.get_snapshot() {
                Ok(session) => (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(e.to_string(), session)),
                )
                    .into_response(),
                Err(e) => {
                    error!("Failed to get session state: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
        Err(CommandError::Internal(e)) => {
            error!("Command failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.start();
    command_response(&state, "Timer started", result)
}

/// Handle POST /pause - Freeze the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.pause();
    command_response(&state, "Timer paused", result)
}

/// Handle POST /reset - Back to a full pomodoro with no completed sessions
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.reset();
    command_response(&state, "Timer reset", result)
}

/// Handle POST /tick - Advance the running countdown by one second
pub async fn tick_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.tick();
    command_response(&state, "Timer advanced", result)
}

/// Handle POST /format - Switch between 25+5 and 50+10
pub async fn format_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FormatRequest>,
) -> Response {
    let result = state.set_format(&request.format);
    command_response(&state, "Format changed", result)
}

/// Handle POST /sessions - Set how many pomodoros lead to a long break
pub async fn sessions_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionsRequest>,
) -> Response {
    let result = state.set_total_sessions(request.total);
    command_response(&state, "Total sessions changed", result)
}

/// Handle POST /session - Jump to a session kind
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Response {
    let result = state.select_session(&request.kind);
    command_response(&state, "Session selected", result)
}

/// Handle GET /status - Return the session snapshot and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        last_expired: state.get_last_expired(),
    }))
}

/// Handle GET /labels - Localized labels for the current format
pub async fn labels_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LabelsQuery>,
) -> Response {
    let language = match query.lang.as_deref().map(str::parse::<Language>) {
        None => Language::default(),
        Some(Ok(language)) => language,
        Some(Err(e)) => {
            warn!("Rejected labels request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.get_format() {
        Ok(format) => Json(LabelsResponse::new(language, format)).into_response(),
        Err(e) => {
            error!("Failed to get session state: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle GET /formats - List formats and their durations
pub async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse::all())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
