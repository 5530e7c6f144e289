//! Alert dispatch from the request path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::stats::{AlertRecord, StatsLedger};

/// Cheap-to-clone handle used wherever an alert can originate.
///
/// Every dispatch appends exactly one ledger record. Delivery to the
/// external sink is an optional extra: absent a sender (notifier
/// disabled) or on a full queue, the record still exists.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    ledger: Arc<StatsLedger>,
    tx: Option<mpsc::Sender<String>>,
}

impl AlertDispatcher {
    pub fn new(ledger: Arc<StatsLedger>, tx: Option<mpsc::Sender<String>>) -> Self {
        Self { ledger, tx }
    }

    /// Record an alert and hand it to the notification worker without
    /// waiting for delivery.
    pub fn dispatch(&self, message: String) {
        self.ledger.push(AlertRecord::now(message.clone()));

        if let Some(tx) = &self.tx {
            match tx.try_send(message) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Alert queue full, dropping notification");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Notification worker stopped, dropping notification");
                }
            }
        }
    }
}
