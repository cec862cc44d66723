mod backend;
mod cli;
mod command;
mod console;

use anyhow::{Result, anyhow};
use backend::ConsoleBackend;
use clap::Parser;
use cli::Cli;
use console::Console;
use std::sync::Arc;
use tracing::debug;
use wayfare_telemetry::TelemetryConfig;
use wayfare_travel::{TravelConfig, start_travel_session};

#[tokio::main]
async fn main() -> Result<()> {
    // .env.local wins over .env; neither is required
    let loaded: Vec<_> =
        [".env.local", ".env"].into_iter().filter_map(|file| dotenvy::from_filename(file).ok()).collect();

    let cli = Cli::parse();

    wayfare_telemetry::init_with_config(
        &TelemetryConfig::new("wayfare").with_log_level(&cli.log_level).with_json(cli.json),
    )
    .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;
    for path in &loaded {
        debug!(path = %path.display(), "Loaded environment file");
    }

    let config = cli.apply(TravelConfig::from_env()?);
    let session = start_travel_session(Arc::new(ConsoleBackend), &config).await?;
    let console = Console::new(session)?;

    match &cli.script {
        Some(path) => console.run_script(path).await,
        None => console.run_interactive().await,
    }
}
