use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use autogen_api::cli::Cli;
use autogen_api::connector::api::LISTEN_ADDR;
use autogen_api::{serve, Container, ContainerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let container = Container::new(ContainerConfig::from_env())?;
    if !container.has_api_key() {
        warn!("SILICONFLOW_API_KEY is not set; every POST endpoint will answer 500");
    }
    info!("Upstream: {}", container.describe());

    let listener = TcpListener::bind(LISTEN_ADDR)
        .await
        .with_context(|| format!("failed to bind {LISTEN_ADDR}"))?;

    serve(listener, Arc::new(container)).await
}
