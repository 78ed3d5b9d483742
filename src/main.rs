//! miniwaf gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 WAF GATEWAY                   │
//!                    │                                               │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│ accept │──▶│ request │──▶│  detection  │  │
//!                    │  │  loop  │   │  parser │   │ features →  │  │
//!                    │  └────────┘   └─────────┘   │ scale→infer │  │
//!                    │                             └──────┬──────┘  │
//!                    │                    benign          │         │
//!                    │               ┌─────────────◀──────┴──▶────┐ │
//!   Client Response  │  ┌─────────┐  │                  malicious │ │
//!   ◀────────────────┼──│  relay  │◀─┘ backend          ┌───────┐ │ │
//!                    │  └─────────┘   connection        │  403  │◀┘ │
//!                    │       ▲            │             └───────┘   │
//!                    └───────┼────────────┼─────────────────────────┘
//!                            └────────────┴──── Backend Server
//! ```
//!
//! One request at a time by construction: the loop resolves each
//! connection fully before accepting the next.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use miniwaf::config::{self, WafConfig};
use miniwaf::http::WafServer;
use miniwaf::lifecycle::{signals, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "miniwaf", about = "Inline ML-scored WAF gateway")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    listen: Option<String>,

    /// Override the protected backend address.
    #[arg(long)]
    backend: Option<String>,

    /// Override the detection threshold.
    #[arg(long)]
    threshold: Option<f32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => WafConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listener.bind_address = listen;
    }
    if let Some(backend) = args.backend {
        config.backend.address = backend;
    }
    if let Some(threshold) = args.threshold {
        config.detection.threshold = threshold;
    }

    // Initialize tracing subscriber
    let default_filter = format!("miniwaf={}", config.observability.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        model = "MLP(22-8-1)",
        bind_address = %config.listener.bind_address,
        backend = %config.backend.address,
        threshold = config.detection.threshold,
        "miniwaf v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => miniwaf::observability::metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = WafServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
