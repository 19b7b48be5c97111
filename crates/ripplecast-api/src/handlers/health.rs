//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::state::AppState;

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        configured: state.orchestrator.is_some(),
    })
}
