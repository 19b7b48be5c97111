//! Impact report wire models
//!
//! The report shape is the wire contract: top-level keys
//! `change_request_id`, `summary`, `details`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ripplecast_domain::{Entity, Relationship};

/// One-line signals per dimension plus the matched domain surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// "{rules_changed} rule(s) changed"
    pub functional: String,
    /// "{fields_added} fields added"
    pub data: String,
    /// "{endpoints_modified} endpoint(s) modified"
    pub api: String,
    /// "{screens_affected} screens affected"
    pub ui: String,
    /// "{n} compliance flags"
    pub compliance: String,
    /// risk_level verbatim
    pub security: String,
    /// latency_impact verbatim
    pub performance: String,
    /// Sorted impacted entity ids
    pub domain_entities_impacted: Vec<String>,
    /// Sorted impacted relationship type labels
    pub domain_relationships_impacted: Vec<String>,
}

/// Full normalized judgments plus full matched domain records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactDetails {
    /// Functional judgment, schema-complete
    pub functional: Map<String, Value>,
    /// Data judgment, schema-complete
    pub data: Map<String, Value>,
    /// API judgment, schema-complete
    pub api: Map<String, Value>,
    /// UI judgment, schema-complete
    pub ui: Map<String, Value>,
    /// Compliance judgment, schema-complete
    pub compliance: Map<String, Value>,
    /// Security judgment, schema-complete
    pub security: Map<String, Value>,
    /// Performance judgment, schema-complete
    pub performance: Map<String, Value>,
    /// Matched entity records, catalogue order
    pub domain_entities: Vec<Entity>,
    /// Every edge whose type label is impacted, catalogue order
    pub domain_relationships: Vec<Relationship>,
}

/// The analysis result returned to the caller; never retained by the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Caller-scoped opaque identifier
    pub change_request_id: String,
    /// Per-dimension one-line signals
    pub summary: ImpactSummary,
    /// Full judgments and domain records
    pub details: ImpactDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_wire_contract_keys() {
        let report = ImpactReport {
            change_request_id: "cr-1".to_string(),
            summary: ImpactSummary {
                functional: "0 rule(s) changed".to_string(),
                data: "0 fields added".to_string(),
                api: "0 endpoint(s) modified".to_string(),
                ui: "0 screens affected".to_string(),
                compliance: "0 compliance flags".to_string(),
                security: "No major risk".to_string(),
                performance: "No significant impact".to_string(),
                domain_entities_impacted: vec![],
                domain_relationships_impacted: vec![],
            },
            details: ImpactDetails {
                functional: Map::new(),
                data: Map::new(),
                api: Map::new(),
                ui: Map::new(),
                compliance: Map::new(),
                security: Map::new(),
                performance: Map::new(),
                domain_entities: vec![],
                domain_relationships: vec![],
            },
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("change_request_id").is_some());
        assert!(value.get("summary").is_some());
        assert!(value.get("details").is_some());

        let summary = value.get("summary").unwrap();
        for key in [
            "functional",
            "data",
            "api",
            "ui",
            "compliance",
            "security",
            "performance",
            "domain_entities_impacted",
            "domain_relationships_impacted",
        ] {
            assert!(summary.get(key).is_some(), "missing summary key {key}");
        }
    }
}
