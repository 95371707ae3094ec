//! FedEx rate-quote gateway.
//!
//! Serves `POST /api/v1/quotes`: looks up package dimensions for a catalog
//! item, authenticates against the carrier, requests rates, and returns
//! normalized shipping options.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fedex_async::Client;
use fedex_async::config::{Config, FedexConfig};

mod catalog;
mod handler;
mod state;

use crate::catalog::DimensionCatalog;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "rate-gateway")]
#[command(about = "HTTP gateway for FedEx rate quotes", version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080", value_name = "ADDR")]
    bind: SocketAddr,

    /// Path to a JSON dimension catalog; the built-in table is used when omitted
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog = match &args.catalog {
        Some(path) => DimensionCatalog::from_file(path)
            .with_context(|| format!("loading dimension catalog from {}", path.display()))?,
        None => DimensionCatalog::builtin(),
    };
    tracing::info!(entries = catalog.len(), "dimension catalog loaded");

    let config = FedexConfig::new();
    if config.credentials().is_none() {
        tracing::warn!("no FEDEX_* credentials in the environment; requests must carry fedexConfig");
    }
    let state = AppState::new(
        Client::with_config(config),
        Arc::new(catalog),
        state::origin_from_env(),
    );

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(addr = %args.bind, "rate gateway listening");
    axum::serve(listener, handler::router(state))
        .await
        .context("server error")?;
    Ok(())
}
