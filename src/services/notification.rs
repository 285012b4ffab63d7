//! External notification command run when a session expires

use std::{fmt, str::FromStr, time::Duration};
use tokio::{process::Command, time::timeout};
use tracing::{debug, info};

use crate::state::SessionExpired;

pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Program plus arguments, e.g. `paplay /usr/share/sounds/bell.oga`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCommand {
    pub program: String,
    pub args: Vec<String>,
    /// The command is killed if it runs longer than this
    pub timeout: Duration,
}

impl FromStr for NotifyCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "notification command is empty".to_string())?;

        Ok(Self {
            program,
            args: parts.collect(),
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        })
    }
}

impl fmt::Display for NotifyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Run the notification command for `expired` and wait for it to finish.
///
/// The expiry details are passed through `STUDY_TIMER_*` environment variables.
/// A command still running after its timeout is killed and reported as an error.
pub async fn run_notify_command(command: &NotifyCommand, expired: &SessionExpired) -> Result<(), String> {
    debug!("Running notification command: {}", command);

    let child = Command::new(&command.program)
        .args(&command.args)
        .env("STUDY_TIMER_FINISHED", expired.finished.as_str())
        .env("STUDY_TIMER_NEXT", expired.next.as_str())
        .env("STUDY_TIMER_COMPLETED", expired.completed_count.to_string())
        .kill_on_drop(true)
        .output();

    let output = timeout(command.timeout, child)
        .await
        .map_err(|_| format!("{} timed out after {:?}", command.program, command.timeout))?
        .map_err(|e| format!("Failed to execute {}: {}", command.program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} exited with {}: {}", command.program, output.status, stderr.trim()));
    }

    info!("Notification command completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::state::SessionKind;

    fn expired() -> SessionExpired {
        SessionExpired {
            finished: SessionKind::Pomodoro,
            next: SessionKind::ShortBreak,
            completed_count: 1,
            at: Utc::now(),
        }
    }

    #[test]
    fn parses_program_and_arguments() {
        let command: NotifyCommand = "paplay  --volume 40000 bell.oga".parse().unwrap();
        assert_eq!(command.program, "paplay");
        assert_eq!(command.args, ["--volume", "40000", "bell.oga"]);
        assert_eq!(command.to_string(), "paplay --volume 40000 bell.oga");
        assert_eq!(command.timeout, DEFAULT_NOTIFY_TIMEOUT);
        assert!("   ".parse::<NotifyCommand>().is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_expiry_details_to_the_command() {
        let command = NotifyCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "test \"$STUDY_TIMER_NEXT\" = short_break && test \"$STUDY_TIMER_COMPLETED\" = 1".to_string(),
            ],
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        };
        assert!(run_notify_command(&command, &expired()).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_failing_and_missing_commands() {
        let failing: NotifyCommand = "false".parse().unwrap();
        assert!(run_notify_command(&failing, &expired()).await.is_err());

        let missing: NotifyCommand = "study-timer-no-such-program".parse().unwrap();
        let err = run_notify_command(&missing, &expired()).await.unwrap_err();
        assert!(err.contains("Failed to execute"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn kills_commands_that_hang() {
        let mut hanging: NotifyCommand = "sleep 30".parse().unwrap();
        hanging.timeout = Duration::from_millis(100);

        let started = std::time::Instant::now();
        let err = run_notify_command(&hanging, &expired()).await.unwrap_err();
        assert!(err.contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
