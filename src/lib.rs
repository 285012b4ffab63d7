//! Study Timer - A state-managed HTTP server driving a Pomodoro study timer
//! 
//! This library provides the Pomodoro session state machine, the scheduler that
//! ticks it once per second, and the HTTP surface a presentation layer drives it
//! through.

pub mod config;
pub mod error;
pub mod labels;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{CommandError, SessionError};
pub use state::{AppState, Format, SessionKind, SessionState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
