//! Alert notification channels
//!
//! A [`Notifier`] delivers one alert. Monitors call it at most once per
//! cycle and never retry; errors are only logged by the caller.

use crate::error::NotifyError;
use std::io::{self, Write};

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Deliver an alert
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Writes alerts to stderr, one line per alert
pub struct TerminalNotifier {
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_colors: color_allowed(
                std::env::var("TERM").ok().as_deref(),
                std::env::var_os("NO_COLOR").is_some(),
            ),
        }
    }

    fn format_alert(&self, subject: &str, body: &str) -> String {
        let tag = if self.use_colors {
            "\x1b[31m\x1b[1m[ALERT]\x1b[0m"
        } else {
            "[ALERT]"
        };
        format!("{} {}: {}", tag, subject, body)
    }
}

/// Colors need a capable terminal and no `NO_COLOR` in the environment
fn color_allowed(term: Option<&str>, no_color: bool) -> bool {
    !no_color && term.is_some_and(|t| t != "dumb")
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.format_alert(subject, body);

        let stderr = io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "{}", message)?;

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}
