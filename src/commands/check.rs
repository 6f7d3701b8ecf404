//! Check command implementation
//!
//! Validates the configuration and lists the monitors it enables.

use super::load_config;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ConfigReport, MonitorSummary};
use crate::error::Result;
use crate::services::MonitorSpec;

/// Execute the check command
pub fn run_check(config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let (path, config) = load_config(config_path)?;

    let notifier = match &config.email {
        Some(email) => format!("email to {} via {}:{}", email.to, email.smtp_server, email.smtp_port),
        None => "terminal".to_string(),
    };

    let report = ConfigReport {
        path: path.display().to_string(),
        notifier,
        monitors: MonitorSpec::enabled(&config)
            .iter()
            .map(MonitorSummary::from)
            .collect(),
    };

    print_output(&report, format)?;
    Ok(())
}
