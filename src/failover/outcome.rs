//! Per-attempt outcome classification.

use std::fmt;

use axum::http::StatusCode;

/// Result of a single fetch attempt against one provider.
///
/// Produced per attempt and consumed immediately by the executor; never
/// persisted.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Provider answered 200 with a decodable JSON body.
    Success(serde_json::Value),
    /// Provider answered 404: the key does not exist upstream.
    NotFound,
    /// Anything else: bad status, connection error, timeout, undecodable
    /// body. Retried against the next candidate.
    Transient(TransientError),
}

/// Detail carried by a transient failure, split the way the alert text
/// reports it: a concrete status code or a transport-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientError {
    Status(StatusCode),
    Request(String),
}

impl fmt::Display for TransientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransientError::Status(code) => write!(f, "status: {} | request failed", code),
            TransientError::Request(detail) => write!(f, "exception: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_detail_formats_match_alert_text() {
        let status = TransientError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status.to_string(),
            "status: 503 Service Unavailable | request failed"
        );

        let request = TransientError::Request("connection refused".to_string());
        assert_eq!(request.to_string(), "exception: connection refused");
    }
}
