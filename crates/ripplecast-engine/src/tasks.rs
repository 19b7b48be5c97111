//! Judgment task definitions
//!
//! A task pairs an instruction template with the structured output schema
//! the generator is asked to produce. Tasks are pure data: defined once,
//! shared across requests, never mutated.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One of the seven independent impact-analysis axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Business-rule impact
    Functional,
    /// Data model impact
    Data,
    /// API surface impact
    Api,
    /// UI/UX impact
    Ui,
    /// Regulatory/compliance impact
    Compliance,
    /// Security risk impact
    Security,
    /// Performance impact
    Performance,
}

impl Dimension {
    /// All seven dimensions, in report order
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Functional,
            Dimension::Data,
            Dimension::Api,
            Dimension::Ui,
            Dimension::Compliance,
            Dimension::Security,
            Dimension::Performance,
        ]
    }

    /// Dimension name as it appears in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Functional => "functional",
            Dimension::Data => "data",
            Dimension::Api => "api",
            Dimension::Ui => "ui",
            Dimension::Compliance => "compliance",
            Dimension::Security => "security",
            Dimension::Performance => "performance",
        }
    }
}

/// Declared type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer
    Int,
    /// String
    Str,
    /// Boolean
    Bool,
    /// Array
    List,
}

impl FieldKind {
    /// Whether a decoded value satisfies this kind; no coercion is
    /// attempted, a mismatch falls back to the declared default
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Int => value.is_i64() || value.is_u64(),
            FieldKind::Str => value.is_string(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::List => value.is_array(),
        }
    }
}

/// One field of a task's output schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name in the generator's JSON output
    pub name: &'static str,
    /// Declared type
    pub kind: FieldKind,
    /// Value used when the field is missing, mistyped, or the whole
    /// output failed to decode
    pub default: Value,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind, default: Value) -> Self {
        Self { name, kind, default }
    }
}

/// A declarative judgment unit: instruction template plus output schema
#[derive(Debug, Clone)]
pub struct JudgmentTask {
    /// Which report dimension this task feeds
    pub dimension: Dimension,
    /// Instruction with `{change_desc}` and `{context}` placeholders
    pub instruction_template: &'static str,
    /// Expected output fields with defaults
    pub schema: Vec<FieldSpec>,
}

impl JudgmentTask {
    /// Substitutes the change text and context into the template
    pub fn render(&self, change_text: &str, context: &str) -> String {
        self.instruction_template
            .replace("{change_desc}", change_text)
            .replace("{context}", context)
    }

    /// The fully-defaulted result, used for decode and branch failures
    pub fn default_result(&self) -> Map<String, Value> {
        self.schema
            .iter()
            .map(|f| (f.name.to_string(), f.default.clone()))
            .collect()
    }
}

/// The fixed set of seven judgment tasks
pub fn default_tasks() -> Vec<JudgmentTask> {
    vec![
        JudgmentTask {
            dimension: Dimension::Functional,
            instruction_template: "You are a system analyst specialized in functional impacts of software changes.\n\
                Change Request Description:\n{change_desc}\n\n\
                Context from system docs:\n{context}\n\n\
                Provide a detailed analysis of functional impact. \
                Answer in JSON with keys: rules_changed (int), description (str).",
            schema: vec![
                FieldSpec::new("rules_changed", FieldKind::Int, json!(0)),
                FieldSpec::new("description", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Data,
            instruction_template: "You are a data impact assessor.\n\
                Change Request Description:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Describe how data is impacted. \
                Return JSON with fields_added (int), fields_modified (int), details (str).",
            schema: vec![
                FieldSpec::new("fields_added", FieldKind::Int, json!(0)),
                FieldSpec::new("fields_modified", FieldKind::Int, json!(0)),
                FieldSpec::new("details", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Api,
            instruction_template: "Analyze API changes.\n\
                Change Request:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Return JSON with endpoints_modified (int), endpoints_added (int), description (str).",
            schema: vec![
                FieldSpec::new("endpoints_modified", FieldKind::Int, json!(0)),
                FieldSpec::new("endpoints_added", FieldKind::Int, json!(0)),
                FieldSpec::new("description", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Ui,
            instruction_template: "Analyze UI/UX impacts.\n\
                Change Request:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Return JSON with screens_affected (int), components_changed (int), summary (str).",
            schema: vec![
                FieldSpec::new("screens_affected", FieldKind::Int, json!(0)),
                FieldSpec::new("components_changed", FieldKind::Int, json!(0)),
                FieldSpec::new("summary", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Compliance,
            instruction_template: "Analyze compliance impact (e.g., GDPR, security policies).\n\
                Change Request:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Return JSON with compliance_flags (list), risk_level (str), details (str).",
            schema: vec![
                FieldSpec::new("compliance_flags", FieldKind::List, json!([])),
                FieldSpec::new("risk_level", FieldKind::Str, json!("")),
                FieldSpec::new("details", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Security,
            instruction_template: "Analyze security risks.\n\
                Change Request:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Return JSON with risk_level (str), vulnerabilities_introduced (bool), description (str).",
            schema: vec![
                FieldSpec::new("risk_level", FieldKind::Str, json!("No major risk")),
                FieldSpec::new("vulnerabilities_introduced", FieldKind::Bool, json!(false)),
                FieldSpec::new("description", FieldKind::Str, json!("")),
            ],
        },
        JudgmentTask {
            dimension: Dimension::Performance,
            instruction_template: "Analyze performance impact.\n\
                Change Request:\n{change_desc}\n\n\
                Context:\n{context}\n\n\
                Return JSON with latency_impact (str), throughput_impact (str), summary (str).",
            schema: vec![
                FieldSpec::new("latency_impact", FieldKind::Str, json!("No significant impact")),
                FieldSpec::new("throughput_impact", FieldKind::Str, json!("")),
                FieldSpec::new("summary", FieldKind::Str, json!("")),
            ],
        },
    ]
}
