use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub variant: Variant,
    pub uptime_ms: u64,
    pub requests: u64,
    pub simulated_failures: u64,
    pub fixture_misses: u64,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let metrics = &state.metrics;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            variant: state.variant,
            uptime_ms: metrics.uptime_ms(),
            requests: metrics.requests(),
            simulated_failures: metrics.simulated_failures(),
            fixture_misses: metrics.fixture_misses(),
        }),
    )
}
