//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{services::NotifyCommand, state::Format};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "study-timer")]
#[command(about = "A state-managed HTTP server driving a Pomodoro study timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial pomodoro format (25+5 or 50+10)
    #[arg(short, long, default_value = "25+5")]
    pub format: Format,

    /// Pomodoros before the long break (1-4)
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u32).range(1..=4))]
    pub sessions: u32,

    /// Scheduler period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Command run whenever a session expires, e.g. "paplay bell.oga"
    #[arg(long)]
    pub notify_command: Option<NotifyCommand>,

    /// Seconds before a hanging notification command is killed
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub notify_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Notification command with the configured timeout applied
    pub fn notify_command(&self) -> Option<NotifyCommand> {
        self.notify_command.clone().map(|command| NotifyCommand {
            timeout: Duration::from_secs(self.notify_timeout_secs),
            ..command
        })
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
