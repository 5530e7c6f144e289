//! Failover gateway library.

pub mod config;
pub mod error;
pub mod failover;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod stats;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
