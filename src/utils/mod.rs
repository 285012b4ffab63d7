//! Utility functions module
//! 
//! Signal handling and formatting helpers shared by the server and the state machine.

pub mod signals;
pub mod time;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time::{format_clock, format_uptime};
