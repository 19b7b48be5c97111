//! Task execution and resilient structured decoding

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use ripplecast_providers::{Result as ProviderResult, TextGenerator};

use crate::tasks::JudgmentTask;

/// Outcome of decoding raw generator output
///
/// Decode failure is an explicit, auditable state, not an exception path;
/// it is silent towards the caller and yields schema defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The output parsed into a JSON object
    Decoded(Map<String, Value>),
    /// Malformed syntax, wrong shape, or a non-object result
    DecodeFailed,
}

/// Executes one judgment task against the generation capability
pub struct TaskRunner {
    generator: Arc<dyn TextGenerator>,
}

impl TaskRunner {
    /// Creates a runner over a generation capability
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Renders, generates, decodes, and normalizes one task
    ///
    /// Decode failures never error; they fall back to the schema defaults.
    /// Generation-capability failures propagate untouched so the
    /// orchestrator can decide per-branch isolation.
    pub async fn run(
        &self,
        task: &JudgmentTask,
        change_text: &str,
        context: &str,
    ) -> ProviderResult<Map<String, Value>> {
        let instruction = task.render(change_text, context);
        let raw = self.generator.generate(&instruction).await?;

        let outcome = decode(&raw);
        if outcome == TaskOutcome::DecodeFailed {
            debug!(dimension = task.dimension.as_str(), "judgment output failed to decode");
        }

        Ok(normalize(task, &outcome))
    }
}

/// Parses raw generator text into a tagged outcome
///
/// Accepts a bare JSON object, or one wrapped in a Markdown code fence;
/// anything else is a decode failure.
pub fn decode(raw: &str) -> TaskOutcome {
    let trimmed = raw.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str(trimmed) {
        return TaskOutcome::Decoded(map);
    }

    if let Some(inner) = strip_code_fence(trimmed) {
        if let Ok(Value::Object(map)) = serde_json::from_str(inner) {
            return TaskOutcome::Decoded(map);
        }
    }

    TaskOutcome::DecodeFailed
}

/// The single default-filling point
///
/// Returns a map holding exactly the schema's fields: a decoded value is
/// kept only when its type matches the declaration, otherwise the default
/// stands in. No coercion, so generation-quality problems stay visible.
pub fn normalize(task: &JudgmentTask, outcome: &TaskOutcome) -> Map<String, Value> {
    let decoded = match outcome {
        TaskOutcome::Decoded(map) => map,
        TaskOutcome::DecodeFailed => return task.default_result(),
    };

    task.schema
        .iter()
        .map(|field| {
            let value = decoded
                .get(field.name)
                .filter(|v| field.kind.matches(v))
                .cloned()
                .unwrap_or_else(|| field.default.clone());
            (field.name.to_string(), value)
        })
        .collect()
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    // Skip an optional language tag on the opening fence line.
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let end = body.rfind("```")?;
    Some(body[..end].trim())
}
