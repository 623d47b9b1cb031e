//! Nimubot webhook server.

use anyhow::{Context, Result};
use clap::Parser;
use jikan_catalog::JikanClient;
use nimubot::{AppState, EventDispatcher, LineClient};
use shared::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "LINE bot serving anime rankings and search", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Listen port (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Initialize logging
    let mut log_config = shared::LogConfig::from_settings("nimubot", &config.logging);
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!("Nimubot starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    config.validate().context("Invalid configuration")?;
    if !config.line.verify_signature {
        warn!("Webhook signature verification is disabled");
    }

    let catalog = JikanClient::from_config(&config.jikan).context("Failed to create Jikan client")?;
    info!(base_url = %catalog.base_url(), "Jikan client ready");

    let platform = LineClient::from_config(&config.line).context("Failed to create LINE client")?;

    let dispatcher = EventDispatcher::new(Arc::new(catalog), Arc::new(platform));
    let channel_secret = config
        .line
        .verify_signature
        .then(|| config.line.channel_secret.clone());
    let state = AppState::new(dispatcher, channel_secret);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    nimubot::server::serve(listener, state).await?;

    info!("Nimubot finished");
    Ok(())
}
