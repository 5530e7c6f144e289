//! Ordered failover walk over the provider traversal order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::GatewayError;
use crate::failover::outcome::{AttemptOutcome, TransientError};
use crate::notify::AlertDispatcher;
use crate::observability::metrics;
use crate::upstream::registry::Provider;
use crate::upstream::PrimarySelector;

/// Field injected into every successful payload naming the provider that
/// served it.
pub const SOURCE_API_FIELD: &str = "source_api";

/// Walks the traversal order for one request, classifying each attempt
/// and updating the primary pointer on the first success.
#[derive(Debug)]
pub struct FailoverExecutor {
    selector: Arc<PrimarySelector>,
    alerts: AlertDispatcher,
    client: reqwest::Client,
    attempt_timeout: Duration,
    path_prefix: String,
}

impl FailoverExecutor {
    pub fn new(
        selector: Arc<PrimarySelector>,
        alerts: AlertDispatcher,
        config: &UpstreamConfig,
    ) -> Self {
        Self {
            selector,
            alerts,
            client: reqwest::Client::new(),
            attempt_timeout: Duration::from_secs(config.attempt_timeout_secs),
            path_prefix: config.path_prefix.clone(),
        }
    }

    /// Fetch `key` through the first provider that can serve it.
    ///
    /// A 404 from any provider is definitive: all providers share the same
    /// dataset, so a miss on one implies a miss on all and no alternates
    /// are tried.
    pub async fn fetch(&self, key: &str) -> Result<Value, GatewayError> {
        let start = Instant::now();
        let order = self.selector.order();

        for (attempt, (index, provider)) in order.into_iter().enumerate() {
            let attempt_number = attempt + 1;

            match self.attempt(&provider, key).await {
                AttemptOutcome::Success(payload) => {
                    self.selector.set_primary_by_index(index);

                    tracing::info!(
                        key = %key,
                        provider = %provider,
                        attempt = attempt_number,
                        "Key fetched"
                    );
                    metrics::record_request("success", provider.base(), start);

                    return Ok(annotate_source(payload, provider.base()));
                }
                AttemptOutcome::NotFound => {
                    let message = format!("key not found: {} on {}", key, provider);
                    tracing::warn!(key = %key, provider = %provider, "Key not found upstream");
                    self.alerts.dispatch(message);
                    metrics::record_request("not_found", provider.base(), start);

                    return Err(GatewayError::NotFound(key.to_string()));
                }
                AttemptOutcome::Transient(error) => {
                    let message = alert_message(&provider, attempt_number, &error);
                    tracing::warn!(
                        key = %key,
                        provider = %provider,
                        attempt = attempt_number,
                        error = %error,
                        "Attempt failed, trying next provider"
                    );
                    self.alerts.dispatch(message);
                    metrics::record_attempt_failure(provider.base());
                }
            }
        }

        tracing::error!(key = %key, "All providers failed");
        metrics::record_request("exhausted", "none", start);
        Err(GatewayError::AllProvidersExhausted)
    }

    /// One bounded fetch against one provider.
    async fn attempt(&self, provider: &Provider, key: &str) -> AttemptOutcome {
        let url = provider.endpoint(&self.path_prefix, key);

        let response = match self
            .client
            .get(&url)
            .timeout(self.attempt_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return AttemptOutcome::Transient(TransientError::Request(e.to_string()));
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<Value>().await {
                Ok(payload) => AttemptOutcome::Success(payload),
                Err(e) => AttemptOutcome::Transient(TransientError::Request(format!(
                    "invalid JSON body: {}",
                    e
                ))),
            },
            StatusCode::NOT_FOUND => AttemptOutcome::NotFound,
            status => AttemptOutcome::Transient(TransientError::Status(status)),
        }
    }
}

/// Attach the winning provider's identity to the payload.
///
/// Upstreams return JSON objects; a non-object body is wrapped instead of
/// failing the request.
fn annotate_source(payload: Value, base_url: &str) -> Value {
    match payload {
        Value::Object(mut map) => {
            map.insert(
                SOURCE_API_FIELD.to_string(),
                Value::String(base_url.to_string()),
            );
            Value::Object(map)
        }
        other => {
            let mut map = serde_json::Map::new();
            map.insert("data".to_string(), other);
            map.insert(
                SOURCE_API_FIELD.to_string(),
                Value::String(base_url.to_string()),
            );
            Value::Object(map)
        }
    }
}

/// Alert text for one failed attempt.
fn alert_message(provider: &Provider, attempt: usize, error: &TransientError) -> String {
    format!("ERROR | api: {} | attempt: {} | {}", provider, attempt, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_inserts_source_into_objects() {
        let payload = serde_json::json!({"name": "alice", "followers": 12});
        let annotated = annotate_source(payload, "https://a.example.com");

        assert_eq!(annotated["name"], "alice");
        assert_eq!(annotated["source_api"], "https://a.example.com");
    }

    #[test]
    fn annotate_wraps_non_objects() {
        let annotated = annotate_source(serde_json::json!([1, 2, 3]), "https://a.example.com");

        assert_eq!(annotated["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(annotated["source_api"], "https://a.example.com");
    }

    #[test]
    fn alert_text_names_provider_attempt_and_detail() {
        let provider = Provider::new("https://a.example.com");

        let status = alert_message(
            &provider,
            1,
            &TransientError::Status(StatusCode::BAD_GATEWAY),
        );
        assert_eq!(
            status,
            "ERROR | api: https://a.example.com | attempt: 1 | status: 502 Bad Gateway | request failed"
        );

        let request = alert_message(
            &provider,
            2,
            &TransientError::Request("connection refused".to_string()),
        );
        assert_eq!(
            request,
            "ERROR | api: https://a.example.com | attempt: 2 | exception: connection refused"
        );
    }
}
