//! Service-level HTTP handlers

use crate::api::models::HealthResponse;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let credential_configured = state.backend.has_credential();

    Json(HealthResponse {
        status: if credential_configured { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.name().to_string(),
        credential_configured,
    })
}
