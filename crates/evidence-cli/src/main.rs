//! gh-evidence - Re-verify GitHub forensic evidence from the command line.

use clap::Parser;
use evidence_cli::commands;
use evidence_cli::{Cli, Command, Config, Formatter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Some item failed verification
const EXIT_FAILED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> evidence_cli::Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter),
        Command::Plan(args) => commands::execute_plan(args, &formatter).map(|_| true),
        Command::Store(args) => commands::execute_store(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter)
                .map(|_| true)
        }
    }
}
