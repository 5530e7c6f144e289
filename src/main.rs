//! Failover gateway.
//!
//! A sticky-primary failover front-end for interchangeable upstream
//! data-fetching services, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │              FAILOVER GATEWAY                 │
//!                    │                                               │
//!   GET /scrape/{k} ─┼─▶ http ──▶ failover ──▶ upstream order       │
//!                    │   server    executor     (sticky primary)     │
//!                    │                │                              │
//!                    │                ├─ attempt 1 ──▶ provider A    │
//!                    │                ├─ attempt 2 ──▶ provider B    │
//!                    │                └─ …                           │
//!                    │                                               │
//!                    │   non-success ──▶ notify (queue + worker)     │
//!                    │                └─▶ stats (alert ring buffer)  │
//!                    │                                               │
//!                    │   cross-cutting: config · observability ·     │
//!                    │                  lifecycle                    │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use failover_gateway::config::loader::load_config;
use failover_gateway::lifecycle::Shutdown;
use failover_gateway::observability;
use failover_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "failover-gateway")]
#[command(about = "Sticky-primary failover front-end for upstream fetch services")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Fail fast: a missing or invalid config is fatal.
    let config = load_config(&cli.config)?;

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        providers = config.upstream.providers.len(),
        notifier_enabled = config.notifier.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
