//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod init;
pub mod run;
pub mod sample;
pub mod test_alert;

pub use check::run_check;
pub use init::run_init;
pub use run::run_monitor;
pub use sample::run_sample;
pub use test_alert::run_test_alert;

use crate::alerts::{EmailNotifier, Notifier, TerminalNotifier};
use crate::cli::args::NotifierArgs;
use crate::config::{Config, ConfigFile};
use crate::error::Result;

use std::path::PathBuf;
use std::sync::Arc;

/// Resolve the config path and load the validated config
pub(crate) fn load_config(path: Option<&str>) -> Result<(PathBuf, Config)> {
    let path = ConfigFile::resolve(path);
    log::debug!("Loading configuration from {}", path.display());
    let config = ConfigFile::load(&path)?;
    Ok((path, config))
}

/// Pick the notifier for `config`: email when configured, terminal otherwise
pub(crate) fn build_notifier(config: &Config, args: NotifierArgs) -> Result<Arc<dyn Notifier>> {
    if args.no_email {
        log::info!("Email disabled; alerts go to the terminal");
        return Ok(Arc::new(TerminalNotifier::new()));
    }

    match &config.email {
        Some(email) => Ok(Arc::new(EmailNotifier::new(email)?)),
        None => {
            log::warn!("No [email] section configured; alerts go to the terminal");
            Ok(Arc::new(TerminalNotifier::new()))
        }
    }
}
