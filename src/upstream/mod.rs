//! Upstream provider subsystem.
//!
//! # Data Flow
//! ```text
//! config → registry.rs (immutable ordered provider list)
//!     → primary.rs (sticky primary pointer + traversal order)
//!     → failover executor walks the order per request
//! ```
//!
//! # Design Decisions
//! - The registry is fixed at startup; only the primary pointer mutates
//! - Traversal order is derived from a one-shot snapshot of the pointer,
//!   so a concurrent repoint never corrupts an in-flight rotation
//! - "Last success wins": the pointer follows whichever provider most
//!   recently served a request

pub mod primary;
pub mod registry;

pub use primary::PrimarySelector;
pub use registry::{Provider, ProviderRegistry};
