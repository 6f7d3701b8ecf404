//! Init command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::ConfigFile;
use crate::error::Result;

/// Write the default configuration file
pub fn run_init(force: bool, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let path = ConfigFile::resolve(config_path);
    ConfigFile::save(&ConfigFile::template(), &path, force)?;

    let msg = Message {
        message: format!("Configuration written to {}", path.display()),
        success: true,
    };
    print_output(&msg, format)?;
    Ok(())
}
