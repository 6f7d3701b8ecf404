//! Test-alert command implementation

use super::{build_notifier, load_config};
use crate::cli::args::{NotifierArgs, OutputFormat};
use crate::cli::output::{print_output, Message};
use crate::error::Result;

const TEST_SUBJECT: &str = "Test Alert";
const TEST_BODY: &str = "This is a test alert from servmon. Notifications are working.";

/// Send one test notification, bypassing every monitor and cooldown
pub fn run_test_alert(
    args: NotifierArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (_, config) = load_config(config_path)?;
    let notifier = build_notifier(&config, args)?;

    notifier.send(TEST_SUBJECT, TEST_BODY)?;

    let msg = Message {
        message: format!("Test alert sent via {}", notifier.name()),
        success: true,
    };
    print_output(&msg, format)?;
    Ok(())
}
