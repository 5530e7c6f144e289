//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, shared state)
//!     → request.rs (attach request ID)
//!     → handlers.rs (/scrape, /set_primary, /health, /stats)
//!     → response.rs (error → status mapping)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
