//! Outbound alerting subsystem.
//!
//! # Data Flow
//! ```text
//! failover executor / admin override
//!     → dispatcher.rs (append alert record, enqueue message)
//!     → bounded mpsc queue
//!     → sink.rs worker (post {recipient, text} to external endpoint)
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: the request path only appends and enqueues; it
//!   never awaits delivery
//! - Queue-full drops the message (with a log line) rather than blocking
//! - Delivery failures are logged and swallowed, never propagated

pub mod dispatcher;
pub mod sink;

pub use dispatcher::AlertDispatcher;
pub use sink::NotificationSink;
