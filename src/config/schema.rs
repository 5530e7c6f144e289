//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the failover gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Upstream provider settings (ordered provider list, attempt timeout).
    pub upstream: UpstreamConfig,

    /// Outbound notification sink settings.
    pub notifier: NotifierConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total request timeout in seconds. Must cover a full traversal of
    /// the provider list at one attempt timeout per provider.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Upstream provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Ordered list of provider base URLs. The first entry is the primary
    /// at startup.
    pub providers: Vec<String>,

    /// Per-attempt timeout in seconds.
    pub attempt_timeout_secs: u64,

    /// Path prefix appended to a provider base URL ahead of the key.
    pub path_prefix: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            attempt_timeout_secs: 10,
            path_prefix: "/scrape".to_string(),
        }
    }
}

/// Notification sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Enable outbound notifications. Alert records are kept either way.
    pub enabled: bool,

    /// Endpoint URL the sink posts messages to.
    pub endpoint: String,

    /// Recipient identifier included with every message.
    pub recipient: String,

    /// Delivery timeout in seconds.
    pub timeout_secs: u64,

    /// Capacity of the pending-notification queue. When full, new
    /// notifications are dropped rather than backpressuring requests.
    pub queue_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            recipient: String::new(),
            timeout_secs: 10,
            queue_capacity: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
