//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Server resource monitor
///
/// Watch CPU, memory, disk and an HTTP endpoint, and send an alert when a
/// threshold is crossed.
#[derive(Parser, Debug)]
#[command(name = "servmon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SERVMON_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start all enabled monitors and run until interrupted
    Run(RunArgs),

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration and show the effective monitors
    Check,

    /// Take one reading of every enabled metric
    Sample,

    /// Send a test notification through the configured notifier
    TestAlert(NotifierArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub notifier: NotifierArgs,
}

/// Notifier selection
#[derive(Parser, Debug, Clone, Copy, Default)]
pub struct NotifierArgs {
    /// Print alerts to the terminal instead of sending email
    #[arg(long)]
    pub no_email: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
