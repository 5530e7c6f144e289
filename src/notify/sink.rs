//! Best-effort delivery to the external notification endpoint.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::config::NotifierConfig;

/// Worker that drains the alert queue and posts each message to the
/// configured endpoint as a `{recipient, text}` form body.
pub struct NotificationSink {
    client: reqwest::Client,
    endpoint: String,
    recipient: String,
    timeout: Duration,
}

impl NotificationSink {
    pub fn new(config: &NotifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            recipient: config.recipient.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Run until the queue closes or shutdown is signalled.
    pub async fn run(
        self,
        mut rx: mpsc::Receiver<String>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(endpoint = %self.endpoint, "Notification worker starting");

        loop {
            tokio::select! {
                message = rx.recv() => {
                    match message {
                        Some(text) => self.deliver(&text).await,
                        None => break,
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Notification worker received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Post one message. Failures are logged and swallowed.
    async fn deliver(&self, text: &str) {
        let params = [("recipient", self.recipient.as_str()), ("text", text)];

        let result = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&params)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Notification delivered");
            }
            Ok(response) => {
                tracing::error!(
                    status = %response.status(),
                    "Notification sink rejected message"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to deliver notification");
            }
        }
    }
}
