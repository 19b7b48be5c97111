//! HTTP boundary for Ripplecast
//!
//! Accepts change descriptions over `POST /analyze`, validates them,
//! generates a request id, and returns the engine's [`ImpactReport`] as-is:
//! the report shape is the wire contract.
//!
//! [`ImpactReport`]: ripplecast_engine::ImpactReport

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ProviderSettings};
pub use error::{ApiError, ApiResult};
pub use routes::app;
pub use state::AppState;
