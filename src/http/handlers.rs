//! Request handlers for the gateway endpoints.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::stats::AlertRecord;

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// `GET /scrape/{key}`: fetch a key through the failover chain.
pub async fn scrape(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, GatewayError> {
    tracing::debug!(
        request_id = %request_id(&headers),
        key = %key,
        "Fetching key"
    );

    let payload = state.executor.fetch(&key).await?;
    Ok(Json(payload))
}

#[derive(Deserialize)]
pub struct SetPrimaryParams {
    /// Base URL of the provider to promote.
    pub api: String,
}

#[derive(Serialize)]
pub struct SetPrimaryResponse {
    pub success: bool,
    pub new_primary: String,
}

/// `GET /set_primary?api=<base_url>`: administrative primary override.
pub async fn set_primary(
    State(state): State<AppState>,
    Query(params): Query<SetPrimaryParams>,
) -> Result<Json<SetPrimaryResponse>, GatewayError> {
    let provider = state.selector.set_primary_by_value(&params.api)?;

    tracing::info!(provider = %provider, "Primary manually set");
    state
        .alerts
        .dispatch(format!("primary api manually set to: {}", provider));

    Ok(Json(SetPrimaryResponse {
        success: true,
        new_primary: provider.base().to_string(),
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub current_primary: String,
    pub last_alerts: Vec<AlertRecord>,
}

/// `GET|HEAD /health`: liveness plus current failover state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        current_primary: state.selector.current().base().to_string(),
        last_alerts: state.ledger.snapshot(),
    })
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub current_primary: String,
    pub last_alerts: Vec<AlertRecord>,
}

/// `GET /stats`: current primary and recent alerts.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        current_primary: state.selector.current().base().to_string(),
        last_alerts: state.ledger.snapshot(),
    })
}
