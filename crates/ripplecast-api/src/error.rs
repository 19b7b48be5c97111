//! API error types and HTTP status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (empty change text)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The generation API key is not configured
    #[error("API key is not configured")]
    NotConfigured,

    /// The engine could not complete the analysis
    #[error("Engine error: {0}")]
    Engine(#[from] ripplecast_engine::EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::NotConfigured => (StatusCode::INTERNAL_SERVER_ERROR, "not_configured"),
            ApiError::Engine(_) => (StatusCode::INTERNAL_SERVER_ERROR, "engine_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
