//! Scoop: prompt compiler for workshop AI-journalist agents.
//!
//! This is the main entry point for the `scoop` CLI. It parses arguments,
//! loads the configuration, installs logging, dispatches to the command
//! handler, and maps errors to exit codes.

use scoop::cli::Cli;
use scoop::context::CommandContext;
use scoop::{commands, exit_codes};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = CommandContext::resolve(cli.config.as_deref()).and_then(|ctx| {
        init_tracing(cli.verbose, &ctx.config.log_level.to_ascii_lowercase());
        commands::dispatch(&ctx, cli.command)
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr. `-v` forces debug, then `RUST_LOG`, then the config level.
fn init_tracing(verbose: bool, config_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
