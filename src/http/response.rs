//! Error-to-response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::GatewayError;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidProvider(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::AllProvidersExhausted => StatusCode::BAD_GATEWAY,
        };

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_expected_statuses() {
        let cases = [
            (
                GatewayError::InvalidProvider("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::NotFound("alice".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (GatewayError::AllProvidersExhausted, StatusCode::BAD_GATEWAY),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
