//! servmon - host resource and HTTP endpoint monitor
//!
//! A command-line daemon that watches CPU, memory, disk and an HTTP endpoint
//! and sends an alert when a threshold is crossed.

use clap::Parser;
use servmon::cli::args::{generate_completions, Cli, Commands};
use servmon::commands::{run_check, run_init, run_monitor, run_sample, run_test_alert};
use servmon::error::{AppError, ConfigError, NotifyError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbose flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Run(args) => run_monitor(args, config, cli.format),

        Commands::Init { force } => run_init(*force, config, cli.format),

        Commands::Check => run_check(config, cli.format),

        Commands::Sample => run_sample(config, cli.format),

        Commands::TestAlert(args) => run_test_alert(*args, config, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Run 'servmon init' to write a default configuration,");
            eprintln!("      or point --config at an existing file.");
        }
        AppError::Notify(NotifyError::Transport(_)) => {
            eprintln!();
            eprintln!("Hint: Check smtp_server, smtp_port and the credentials in [email].");
            eprintln!("      Use --no-email to print alerts to the terminal instead.");
        }
        _ => {}
    }
}
