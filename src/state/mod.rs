//! State management module
//! 
//! The pure session state machine, the format table it runs on, and the shared
//! application state that serializes access to it.

pub mod format;
pub mod session_state;
pub mod app_state;

// Re-export main types
pub use format::{Format, SessionKind, SessionSpec};
pub use session_state::{SessionExpired, SessionSnapshot, SessionState};
pub use app_state::AppState;
