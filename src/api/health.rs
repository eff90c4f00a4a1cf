//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    /// Configured cascade order
    pub backends: Vec<String>,
    pub generation_configured: bool,
}

/// GET /health - Return service status.
///
/// Reports "degraded" when generation is not configured: requests still
/// succeed, but only from templates.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cascade = state.composer.cascade();
    let configured = cascade.is_configured();

    Json(HealthResponse {
        status: if configured { "healthy" } else { "degraded" }.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        backends: cascade.order().iter().map(|b| b.to_string()).collect(),
        generation_configured: configured,
    })
}
