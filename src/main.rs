mod app;
mod error;
mod handlers;
mod models;
mod services;
mod utils;

use anyhow::Context;
use app::{build_router, config::Config};
use clap::Parser;
use services::{PayPhoneClient, PrepareService, TimestampIdGenerator};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Prepares PayPhone button payments on behalf of a frontend.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Port to listen on, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Sem .env também funciona: o ambiente do processo basta.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.server_port = port;
    }

    if config.token.is_none() {
        warn!("PAYPHONE_TOKEN is not set, prepare requests will fail");
    }
    if config.store_id.is_none() {
        warn!("PAYPHONE_STORE_ID is not set, prepare requests will fail");
    }

    let client = PayPhoneClient::new(config.prepare_url.clone())
        .context("Failed to create HTTP client")?;
    let port = config.server_port;
    let cors_allow_origins = config.cors_allow_origins.clone();
    let service = Arc::new(PrepareService::new(config, client, TimestampIdGenerator));

    let app = build_router(service, &cors_allow_origins)?;

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Backend corriendo en http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
