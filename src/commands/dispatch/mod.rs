//! Command dispatch logic for obs

use std::path::PathBuf;
use std::time::Instant;

use obs_core::config::Config;
use obs_core::dispatch::Dispatcher;
use obs_core::error::Result;
use obs_core::generation::OpenAiClient;
use tracing::debug;

use super::report;
use crate::cli::Cli;

/// Load configuration once, then hand the request to the core dispatcher
pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config_path = resolve_config_path(cli)?;
    let config = Config::load(&config_path)?;

    debug!(elapsed = ?start.elapsed(), path = %config_path.display(), "load_config");

    let request = cli.request();
    let quiet = cli.quiet;

    let outcome = Dispatcher::new(&config)
        .on_backup(move |backup| report::backup(backup, quiet))
        .execute(&request, |config, api_key| {
            OpenAiClient::new(api_key, config.generation.clone())
        })?;

    debug!(elapsed = ?start.elapsed(), "execute");

    report::outcome(&outcome, quiet);
    Ok(())
}

/// `--config` (or `$OBS_CONFIG`, via clap), else `~/.obs_config.yaml`
fn resolve_config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Config::default_path(),
    }
}
