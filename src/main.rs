//! sfetch-proxy
//!
//! A single-hop HTTP forwarding proxy built with Tokio, Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                    SFETCH PROXY                       │
//!   Client Request      │  ┌─────────┐    ┌──────────┐    ┌──────────────┐     │
//!   ────────────────────┼─▶│  http   │───▶│ routing  │───▶│   forward    │─────┼──▶ Origin
//!                       │  │ handler │    │ mode +   │    │  dispatcher  │     │
//!                       │  └─────────┘    │ resolver │    │  (reqwest)   │     │
//!                       │                 └──────────┘    └──────┬───────┘     │
//!   Client Response     │  ┌─────────────────────┐               │             │
//!   ◀───────────────────┼──│ http::response      │◀──────────────┘             │
//!                       │  │ composer + headers  │                             │
//!                       │  └─────────────────────┘                             │
//!                       └──────────────────────────────────────────────────────┘
//! ```
//!
//! Two invocation modes share one entry point:
//! - header-driven: `x-sfetch-url` names the origin, the request is forwarded as-is
//! - descriptor: a JSON body describes the outbound request
//!
//! Redirects are never followed and every origin status is passed through.

use std::path::PathBuf;

use clap::Parser;

use sfetch_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use sfetch_proxy::lifecycle::startup;
use sfetch_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "sfetch-proxy")]
#[command(about = "Single-hop HTTP forwarding proxy", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;
    tracing::info!("sfetch-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
