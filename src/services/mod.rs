//! External service management module
//! 
//! This module contains the process-spawning side effects kept out of the session
//! state machine, such as playing the expiry notification.

pub mod notification;

// Re-export main functions
pub use notification::*;
