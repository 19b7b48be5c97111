//! Top-level impact-analysis coordination

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{Map, Value};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use ripplecast_domain::DomainGraph;
use ripplecast_providers::TextGenerator;
use ripplecast_retrieval::ContextRetriever;

use crate::error::Result;
use crate::report::{ImpactDetails, ImpactReport, ImpactSummary};
use crate::runner::TaskRunner;
use crate::tasks::{default_tasks, Dimension, JudgmentTask};

/// Default fact appended when a change description omits a deprecation
/// schedule; downstream compliance and functional judgments are more
/// reliable when this commonly-omitted fact is always present
pub const DEPRECATION_CLAUSE: &str =
    "Deprecation Schedule: No deprecation planned in next 3 minor releases.";

/// Orchestrator tuning knobs
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Upper bound per judgment branch; a branch that exceeds it is folded
    /// to schema defaults, same as a decode failure
    pub task_timeout: Option<Duration>,
}

/// Coordinates enrichment, retrieval, judgment fan-out, domain matching,
/// and aggregation into one [`ImpactReport`]
pub struct ImpactOrchestrator {
    graph: Arc<DomainGraph>,
    retriever: Arc<ContextRetriever>,
    runner: TaskRunner,
    tasks: Vec<JudgmentTask>,
    config: OrchestratorConfig,
}

impl ImpactOrchestrator {
    /// Creates an orchestrator over the three capabilities
    pub fn new(
        graph: Arc<DomainGraph>,
        retriever: Arc<ContextRetriever>,
        generator: Arc<dyn TextGenerator>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            graph,
            retriever,
            runner: TaskRunner::new(generator),
            tasks: default_tasks(),
            config,
        }
    }

    /// Runs one full analysis
    ///
    /// The seven judgment branches are independent and run concurrently;
    /// each is fail-safe on its own, so the report is complete-shaped even
    /// when every branch degraded to defaults. Only retrieval failures
    /// abort the analysis.
    pub async fn analyze(&self, change_request_id: &str, change_text: &str) -> Result<ImpactReport> {
        let enriched = enrich(change_text);
        let context = self.retriever.retrieve(&enriched).await?;

        let branches = self
            .tasks
            .iter()
            .map(|task| self.run_branch(task, &enriched, &context));
        let outcomes = join_all(branches).await;

        let failed = outcomes.iter().filter(|(_, _, failed)| *failed).count();
        if failed == self.tasks.len() {
            error!(change_request_id, "every judgment branch failed; report carries defaults only");
        } else if failed > 0 {
            debug!(change_request_id, failed, "some judgment branches degraded to defaults");
        }

        let mut judgments: HashMap<Dimension, Map<String, Value>> = outcomes
            .into_iter()
            .map(|(dimension, result, _)| (dimension, result))
            .collect();
        let mut judgment = |d: Dimension| judgments.remove(&d).unwrap_or_default();

        let functional = judgment(Dimension::Functional);
        let data = judgment(Dimension::Data);
        let api = judgment(Dimension::Api);
        let ui = judgment(Dimension::Ui);
        let compliance = judgment(Dimension::Compliance);
        let security = judgment(Dimension::Security);
        let performance = judgment(Dimension::Performance);

        let impacted_entities = self.graph.match_text(&enriched);
        let impacted_relationships = self.graph.relationships_for(&impacted_entities);

        info!(
            change_request_id,
            entities = impacted_entities.len(),
            relationships = impacted_relationships.len(),
            "analysis complete"
        );

        let summary = ImpactSummary {
            functional: format!("{} rule(s) changed", int_field(&functional, "rules_changed")),
            data: format!("{} fields added", int_field(&data, "fields_added")),
            api: format!("{} endpoint(s) modified", int_field(&api, "endpoints_modified")),
            ui: format!("{} screens affected", int_field(&ui, "screens_affected")),
            compliance: format!("{} compliance flags", list_len(&compliance, "compliance_flags")),
            security: str_field(&security, "risk_level", "No major risk"),
            performance: str_field(&performance, "latency_impact", "No significant impact"),
            domain_entities_impacted: impacted_entities.clone(),
            domain_relationships_impacted: impacted_relationships.clone(),
        };

        let details = ImpactDetails {
            functional,
            data,
            api,
            ui,
            compliance,
            security,
            performance,
            domain_entities: self.graph.entities_by_ids(&impacted_entities),
            domain_relationships: self.graph.relationships_by_kinds(&impacted_relationships),
        };

        Ok(ImpactReport {
            change_request_id: change_request_id.to_string(),
            summary,
            details,
        })
    }

    /// Runs one branch, folding every failure mode into schema defaults
    ///
    /// A provider failure is logged distinctly from a decode failure (which
    /// the runner already logged); at the report level both look identical
    /// by design.
    async fn run_branch(
        &self,
        task: &JudgmentTask,
        change_text: &str,
        context: &str,
    ) -> (Dimension, Map<String, Value>, bool) {
        let run = self.runner.run(task, change_text, context);

        let result = match self.config.task_timeout {
            Some(limit) => match timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        dimension = task.dimension.as_str(),
                        "judgment branch timed out; using schema defaults"
                    );
                    return (task.dimension, task.default_result(), true);
                }
            },
            None => run.await,
        };

        match result {
            Ok(normalized) => (task.dimension, normalized, false),
            Err(err) => {
                warn!(
                    dimension = task.dimension.as_str(),
                    error = %err,
                    "generation capability failed; using schema defaults"
                );
                (task.dimension, task.default_result(), true)
            }
        }
    }
}

/// Appends the default deprecation fact unless the text already mentions a
/// schedule, case-insensitively; applied exactly once, before any task runs
pub fn enrich(change_text: &str) -> String {
    if change_text.to_lowercase().contains("deprecation schedule") {
        change_text.to_string()
    } else {
        format!("{change_text} {DEPRECATION_CLAUSE}")
    }
}

fn int_field(map: &Map<String, Value>, name: &str) -> i64 {
    map.get(name).and_then(Value::as_i64).unwrap_or(0)
}

fn str_field(map: &Map<String, Value>, name: &str, fallback: &str) -> String {
    map.get(name).and_then(Value::as_str).unwrap_or(fallback).to_string()
}

fn list_len(map: &Map<String, Value>, name: &str) -> usize {
    map.get(name).and_then(Value::as_array).map(Vec::len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ripplecast_providers::ProviderError;
    use ripplecast_retrieval::{Embedder, IndexedPassage, RetrievalError, VectorIndex};
    use std::sync::Mutex;

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

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _instruction: &str) -> ripplecast_providers::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        fn id(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _instruction: &str) -> ripplecast_providers::Result<String> {
            Err(ProviderError::Unavailable("quota exhausted".to_string()))
        }
    }

    struct RecordingGenerator(Mutex<Vec<String>>);

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn id(&self) -> &str {
            "recording"
        }

        async fn generate(&self, instruction: &str) -> ripplecast_providers::Result<String> {
            self.0.lock().unwrap().push(instruction.to_string());
            Ok("no structure here".to_string())
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        fn id(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _instruction: &str) -> ripplecast_providers::Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("{}".to_string())
        }
    }

    fn retriever(passages: Vec<IndexedPassage>) -> Arc<ContextRetriever> {
        let index = VectorIndex::new(2, passages).unwrap();
        Arc::new(ContextRetriever::new(index, Arc::new(StubEmbedder)))
    }

    fn orchestrator(generator: Arc<dyn TextGenerator>) -> ImpactOrchestrator {
        ImpactOrchestrator::new(
            Arc::new(DomainGraph::builtin().unwrap()),
            retriever(vec![IndexedPassage {
                content: "The claims module processes insurance claims for customers.".to_string(),
                embedding: vec![1.0, 0.0],
            }]),
            generator,
            OrchestratorConfig::default(),
        )
    }

    #[test]
    fn enrich_appends_clause_exactly_once_when_absent() {
        let enriched = enrich("Add a CRM field.");
        assert_eq!(enriched.matches("Deprecation Schedule").count(), 1);
        assert!(enriched.starts_with("Add a CRM field."));
    }

    #[test]
    fn enrich_leaves_text_untouched_when_schedule_mentioned() {
        let text = "Remove the endpoint. deprecation SCHEDULE: two releases.";
        assert_eq!(enrich(text), text);
    }

    #[tokio::test]
    async fn well_formed_judgments_drive_summary_lines() {
        let generator = FixedGenerator(
            r#"{"rules_changed": 2, "fields_added": 3, "endpoints_modified": 1,
                "screens_affected": 4, "compliance_flags": ["GDPR", "KYC"],
                "risk_level": "High", "latency_impact": "Minor regression",
                "vulnerabilities_introduced": false}"#,
        );
        let orchestrator = orchestrator(Arc::new(generator));

        let report = orchestrator.analyze("cr-1", "Add a field.").await.unwrap();

        assert_eq!(report.summary.functional, "2 rule(s) changed");
        assert_eq!(report.summary.data, "3 fields added");
        assert_eq!(report.summary.api, "1 endpoint(s) modified");
        assert_eq!(report.summary.ui, "4 screens affected");
        assert_eq!(report.summary.compliance, "2 compliance flags");
        assert_eq!(report.summary.security, "High");
        assert_eq!(report.summary.performance, "Minor regression");
    }

    #[tokio::test]
    async fn all_branches_failing_still_produces_a_defaults_only_report() {
        let orchestrator = orchestrator(Arc::new(FailingGenerator));

        let report = orchestrator.analyze("cr-2", "Add a field.").await.unwrap();

        assert_eq!(report.change_request_id, "cr-2");
        assert_eq!(report.summary.functional, "0 rule(s) changed");
        assert_eq!(report.summary.security, "No major risk");
        assert_eq!(report.summary.performance, "No significant impact");
        assert_eq!(report.details.functional.len(), 2);
    }

    #[tokio::test]
    async fn garbage_output_report_is_indistinguishable_from_no_impact() {
        let orchestrator = orchestrator(Arc::new(FixedGenerator("not json")));

        let report = orchestrator.analyze("cr-3", "Add a field.").await.unwrap();

        assert_eq!(report.summary.compliance, "0 compliance flags");
        assert_eq!(report.summary.security, "No major risk");
    }

    #[tokio::test]
    async fn every_instruction_carries_the_enriched_text_and_context() {
        let recording = Arc::new(RecordingGenerator(Mutex::new(Vec::new())));
        let orchestrator = orchestrator(recording.clone());

        orchestrator.analyze("cr-4", "Change the claims flow.").await.unwrap();

        let instructions = recording.0.lock().unwrap();
        assert_eq!(instructions.len(), 7);
        for instruction in instructions.iter() {
            assert_eq!(instruction.matches("Deprecation Schedule").count(), 1);
            assert!(instruction.contains("The claims module processes insurance claims"));
        }
    }

    #[tokio::test]
    async fn empty_index_runs_tasks_with_empty_context() {
        let recording = Arc::new(RecordingGenerator(Mutex::new(Vec::new())));
        let orchestrator = ImpactOrchestrator::new(
            Arc::new(DomainGraph::builtin().unwrap()),
            retriever(Vec::new()),
            recording.clone(),
            OrchestratorConfig::default(),
        );

        let report = orchestrator.analyze("cr-5", "Change the claims flow.").await.unwrap();

        assert_eq!(recording.0.lock().unwrap().len(), 7);
        assert!(report.summary.domain_entities_impacted.contains(&"Claim".to_string()));
    }

    #[tokio::test]
    async fn retrieval_failure_aborts_the_analysis() {
        struct BrokenEmbedder;

        #[async_trait]
        impl Embedder for BrokenEmbedder {
            fn dimension(&self) -> usize {
                2
            }

            async fn embed(&self, _text: &str) -> ripplecast_retrieval::Result<Vec<f32>> {
                Err(RetrievalError::EmbeddingFailed("offline".to_string()))
            }
        }

        let index = VectorIndex::new(2, Vec::new()).unwrap();
        let orchestrator = ImpactOrchestrator::new(
            Arc::new(DomainGraph::builtin().unwrap()),
            Arc::new(ContextRetriever::new(index, Arc::new(BrokenEmbedder))),
            Arc::new(FixedGenerator("{}")),
            OrchestratorConfig::default(),
        );

        assert!(orchestrator.analyze("cr-6", "x").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_branch_folds_to_defaults() {
        let orchestrator = ImpactOrchestrator::new(
            Arc::new(DomainGraph::builtin().unwrap()),
            retriever(Vec::new()),
            Arc::new(SlowGenerator),
            OrchestratorConfig {
                task_timeout: Some(Duration::from_secs(5)),
            },
        );

        let report = orchestrator.analyze("cr-7", "Add a field.").await.unwrap();
        assert_eq!(report.summary.functional, "0 rule(s) changed");
    }
}
