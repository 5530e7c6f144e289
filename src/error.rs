//! Request-level error taxonomy.
//!
//! Only these errors ever reach a client. Per-attempt transient failures
//! are consumed inside the failover loop and surface, at most, as
//! `AllProvidersExhausted`.

use thiserror::Error;

/// Errors surfaced to callers of the gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// An administrative override named a provider that is not configured.
    #[error("invalid provider: '{0}' is not one of the configured upstreams")]
    InvalidProvider(String),

    /// A provider answered with a definitive miss for the key.
    /// Terminal across all providers: a miss on one implies a miss on all.
    #[error("key not found: {0}")]
    NotFound(String),

    /// Every candidate in the traversal order failed transiently.
    #[error("all upstream providers failed")]
    AllProvidersExhausted,
}
