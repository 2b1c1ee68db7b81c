use anyhow::Result;
use clap::Parser;
use tracing::info;

use mock_upstream::{cli::Cli, config::Settings, server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the log filter reads RUST_LOG
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    telemetry::init_telemetry();

    info!("Starting mock upstream ({})...", cli.variant);

    // Load configuration
    let mut settings = Settings::load(cli.variant)?;
    cli.apply(&mut settings);
    info!("Configuration loaded");

    server::run(settings, cli.variant).await
}
