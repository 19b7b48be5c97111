//! Change analysis handler

use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use ripplecast_engine::ImpactReport;

use crate::error::{ApiError, ApiResult};
use crate::models::AnalyzeRequest;
use crate::state::AppState;

/// `POST /analyze`
///
/// Rejects empty or whitespace-only change text before the engine ever
/// sees it, generates the change request id, and returns the report
/// verbatim.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<ImpactReport>> {
    let change_text = request.change_text.trim();
    if change_text.is_empty() {
        return Err(ApiError::BadRequest("no change description provided".to_string()));
    }

    let Some(orchestrator) = &state.orchestrator else {
        return Err(ApiError::NotConfigured);
    };

    let change_request_id = Uuid::new_v4().to_string();
    info!(%change_request_id, "received analyze request");

    let report = orchestrator.analyze(&change_request_id, change_text).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ripplecast_domain::DomainGraph;
    use ripplecast_engine::{ImpactOrchestrator, OrchestratorConfig};
    use ripplecast_providers::TextGenerator;
    use ripplecast_retrieval::{ContextRetriever, Embedder, VectorIndex};
    use std::sync::Arc;

    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, _text: &str) -> ripplecast_retrieval::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
    }

    struct StubGenerator;

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn id(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _instruction: &str) -> ripplecast_providers::Result<String> {
            Ok(r#"{"rules_changed": 1}"#.to_string())
        }
    }

    fn configured_state() -> AppState {
        let index = VectorIndex::new(2, Vec::new()).unwrap();
        let retriever = Arc::new(ContextRetriever::new(index, Arc::new(StubEmbedder)));
        let orchestrator = ImpactOrchestrator::new(
            Arc::new(DomainGraph::builtin().unwrap()),
            retriever,
            Arc::new(StubGenerator),
            OrchestratorConfig::default(),
        );
        AppState::new(Some(Arc::new(orchestrator)))
    }

    #[tokio::test]
    async fn whitespace_only_text_is_rejected() {
        let result = analyze(
            State(configured_state()),
            Json(AnalyzeRequest {
                change_text: "   \n\t ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn missing_key_yields_not_configured() {
        let result = analyze(
            State(AppState::new(None)),
            Json(AnalyzeRequest {
                change_text: "change the claims flow".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::NotConfigured)));
    }

    #[tokio::test]
    async fn valid_request_returns_a_report_with_generated_id() {
        let result = analyze(
            State(configured_state()),
            Json(AnalyzeRequest {
                change_text: "change the claims flow".to_string(),
            }),
        )
        .await
        .unwrap();

        let report = result.0;
        assert!(!report.change_request_id.is_empty());
        assert_eq!(report.summary.functional, "1 rule(s) changed");
    }
}
