//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::handlers::{analyze, health};
use crate::state::AppState;

/// Builds the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/analyze", post(analyze::analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
