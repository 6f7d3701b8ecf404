//! Run command implementation
//!
//! Starts every enabled monitor and blocks until Ctrl+C or SIGTERM.

use super::{build_notifier, load_config};
use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::output::{print_output, Message};
use crate::config::ConfigFile;
use crate::error::{AppError, Result};
use crate::services::Supervisor;

/// Execute the run command.
///
/// With no config file present, the default one is written and the command
/// exits without monitoring.
pub fn run_monitor(args: &RunArgs, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let path = ConfigFile::resolve(config_path);
    if !path.exists() {
        ConfigFile::save(&ConfigFile::template(), &path, false)?;
        let msg = Message {
            message: format!(
                "Default configuration created at {}. Edit it, then run again.",
                path.display()
            ),
            success: true,
        };
        print_output(&msg, format)?;
        return Ok(());
    }

    let (_, config) = load_config(config_path)?;
    let notifier = build_notifier(&config, args.notifier)?;
    log::info!("Alerts are delivered via {}", notifier.name());

    let supervisor = Supervisor::start(&config, notifier)?;

    let cancel = supervisor.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        cancel.cancel();
    }) {
        supervisor.shutdown();
        return Err(AppError::Signal(e.to_string()));
    }

    log::info!(
        "{} monitors running. Press Ctrl+C to stop.",
        supervisor.running()
    );
    supervisor.wait();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::NotifierArgs;

    #[test]
    fn test_first_run_writes_template_and_exits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let args = RunArgs {
            notifier: NotifierArgs::default(),
        };

        run_monitor(&args, path.to_str(), OutputFormat::Compact).unwrap();

        let written = ConfigFile::load(&path).unwrap();
        assert_eq!(written, ConfigFile::template());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds.http]\nsample_rate = 0\n").unwrap();
        let args = RunArgs {
            notifier: NotifierArgs { no_email: true },
        };

        let result = run_monitor(&args, path.to_str(), OutputFormat::Table);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
