//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS)
//! - Construct and share the failover subsystems
//! - Spawn the notification worker
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::failover::FailoverExecutor;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::notify::{AlertDispatcher, NotificationSink};
use crate::stats::StatsLedger;
use crate::upstream::{PrimarySelector, ProviderRegistry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<FailoverExecutor>,
    pub selector: Arc<PrimarySelector>,
    pub ledger: Arc<StatsLedger>,
    pub alerts: AlertDispatcher,
}

/// HTTP server for the failover gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    notifier: Option<(NotificationSink, mpsc::Receiver<String>)>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let registry = Arc::new(ProviderRegistry::new(&config.upstream.providers));
        let selector = Arc::new(PrimarySelector::new(registry));
        let ledger = Arc::new(StatsLedger::new());

        // The queue exists only when the notifier is enabled; alerts are
        // recorded in the ledger either way.
        let (notifier, alert_tx) = if config.notifier.enabled {
            let (tx, rx) = mpsc::channel(config.notifier.queue_capacity);
            let sink = NotificationSink::new(&config.notifier);
            (Some((sink, rx)), Some(tx))
        } else {
            (None, None)
        };

        let alerts = AlertDispatcher::new(ledger.clone(), alert_tx);
        let executor = Arc::new(FailoverExecutor::new(
            selector.clone(),
            alerts.clone(),
            &config.upstream,
        ));

        let state = AppState {
            executor,
            selector,
            ledger,
            alerts,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            notifier,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::HEAD])
            .allow_headers(Any);

        Router::new()
            .route("/scrape/{key}", get(handlers::scrape))
            .route("/set_primary", get(handlers::set_primary))
            .route("/health", get(handlers::health))
            .route("/stats", get(handlers::stats))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        if let Some((sink, rx)) = self.notifier {
            let worker_shutdown = shutdown.resubscribe();
            tokio::spawn(async move {
                sink.run(rx, worker_shutdown).await;
            });
        }

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
