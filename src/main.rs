//! QR code HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 QR SERVICE                   │
//!                        │                                              │
//!     Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│    qr    │───▶│ encoder │  │
//!                        │  │ server  │    │ validate │    │ (qrcode │  │
//!                        │  └─────────┘    └──────────┘    │ + image)│  │
//!                        │                                 └────┬────┘  │
//!     Client Response    │  ┌──────────┐                        │       │
//!     ◀──────────────────┼──│ response │◀───────────────────────┘       │
//!                        │  │  shaping │                                │
//!                        │  └──────────┘                                │
//!                        │                                              │
//!                        │  config · observability · resilience ·       │
//!                        │  lifecycle                                   │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use qr_service::config::load_config;
use qr_service::lifecycle::{signals, Shutdown};
use qr_service::observability::{logging, metrics};
use qr_service::HttpServer;

#[derive(Parser)]
#[command(name = "qr-service", version, about = "HTTP service that renders QR codes")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, rejected) = load_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability);
    tracing::info!("qr-service v{} starting", env!("CARGO_PKG_VERSION"));

    for rejected in &rejected {
        tracing::warn!(key = rejected.key, value = %rejected.value, "Ignoring invalid environment override");
    }

    tracing::info!(
        bind_address = %config.server.bind_address(),
        max_content_chars = config.qr.max_content_chars,
        request_timeout_secs = config.timeouts.request_secs,
        encode_timeout_secs = config.timeouts.encode_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
