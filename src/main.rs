//! Squares - terminal client
//!
//! Play Squares against a computer opponent served over HTTP.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use squares::{Availability, ClientConfig};
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { size, color, ruleset } => {
            let mut config = load_config(cli.config.as_deref(), cli.base_url)?;
            if let Some(size) = size {
                config = config.with_board_size(size);
            }
            if let Some(color) = color {
                config = config.with_player_color(color);
            }
            if let Some(ruleset) = ruleset {
                config = config.with_ruleset(ruleset);
            }
            config.validate()?;
            tui::run(config).await
        }
        Command::Health { retries } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            let config = load_config(cli.config.as_deref(), cli.base_url)?;
            config.validate()?;
            run_health(config, retries).await
        }
    }
}

/// Builds the configuration from file, environment and the global `--base-url` flag.
fn load_config(path: Option<&Path>, base_url: Option<String>) -> Result<ClientConfig> {
    let config = ClientConfig::load(path)?;
    Ok(match base_url {
        Some(url) => config.with_base_url(url),
        None => config,
    })
}

/// Probes the API and reports whether it answered.
#[instrument(skip(config), fields(base_url = %config.base_url()))]
async fn run_health(config: ClientConfig, retries: Option<u32>) -> Result<()> {
    let retries = retries.unwrap_or(*config.availability_retries());
    let client = config.api_client()?;

    info!(retries, "Checking API availability");
    match client.check_availability(retries).await {
        Availability::Available { retries } => {
            println!("API available at {} (after {} retries)", client.base_url(), retries);
            Ok(())
        }
        Availability::Unavailable { attempts, message } => {
            warn!(attempts, %message, "API unavailable");
            bail!("API unavailable at {} after {} attempts: {}", client.base_url(), attempts, message)
        }
    }
}
