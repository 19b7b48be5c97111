//! Application state shared across handlers

use std::sync::Arc;

use ripplecast_engine::ImpactOrchestrator;

/// Shared handler state
///
/// The orchestrator is absent when no API key was configured at startup;
/// requests then get a server error, mirroring a missing-credential
/// deployment rather than refusing to boot.
#[derive(Clone)]
pub struct AppState {
    /// The analysis engine, when fully configured
    pub orchestrator: Option<Arc<ImpactOrchestrator>>,
}

impl AppState {
    /// Creates handler state
    pub fn new(orchestrator: Option<Arc<ImpactOrchestrator>>) -> Self {
        Self { orchestrator }
    }
}
