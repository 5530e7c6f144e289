//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): finished requests by outcome
//!   (success, not_found, exhausted) and winning provider
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_attempt_failures_total` (counter): transient attempt
//!   failures per provider

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record a finished request.
pub fn record_request(outcome: &str, provider: &str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "outcome" => outcome.to_string(),
        "provider" => provider.to_string()
    )
    .increment(1);

    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one transient attempt failure against a provider.
pub fn record_attempt_failure(provider: &str) {
    counter!(
        "gateway_attempt_failures_total",
        "provider" => provider.to_string()
    )
    .increment(1);
}
