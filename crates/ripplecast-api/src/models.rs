//! Request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text change description
    pub change_text: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the service is up
    pub status: &'static str,
    /// Whether the generation capability is configured
    pub configured: bool,
}
