//! obs - LLM-assisted note editing for Obsidian-style vaults
//!
//! Creates notes, and appends or inserts model-generated content into
//! existing notes after taking a timestamped backup.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use obs_core::error::ExitCode as ObsExitCode;
use obs_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = Cli::parse();

    // Initialize structured logging
    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(ObsExitCode::Success as u8),
        Err(e) => {
            let exit_code = e.exit_code();
            if !cli.quiet {
                eprintln!("error: {}", e);
            }
            ExitCode::from(exit_code as u8)
        }
    }
}
