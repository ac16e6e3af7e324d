//! pitchd - sales-roleplay backend
//!
//! Forwards a salesperson's line to the model as an in-character prospect,
//! then has the model grade the exchange.

use anyhow::{Context, Result};
use clap::Parser;
use pitch_common::PitchConfig;
use pitchd::cli::Cli;
use pitchd::gateway::GroqClient;
use pitchd::server;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("[BOOT] pitchd v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config =
        PitchConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let gateway = GroqClient::new(&config.llm);
    info!(
        "[BOOT] Model gateway: {} via {}",
        config.llm.model,
        gateway.endpoint()
    );
    info!(
        "[BOOT] API key: {}",
        if gateway.has_api_key() { "configured" } else { "missing" }
    );

    server::run(&config, Arc::new(gateway)).await
}
