//! Operator-facing statistics subsystem.
//!
//! Holds the bounded alert history surfaced by `/health` and `/stats`.

pub mod ledger;

pub use ledger::{AlertRecord, StatsLedger, ALERT_CAPACITY};
