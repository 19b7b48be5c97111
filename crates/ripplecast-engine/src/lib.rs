//! Impact-analysis orchestration engine
//!
//! Fans a change description out to seven independent judgment tasks,
//! retrieves supporting context, matches the change against the domain
//! graph, and aggregates everything into one [`ImpactReport`].
//!
//! Each judgment branch is fail-safe on its own: a provider failure or an
//! undecodable output folds to the task's declared schema defaults rather
//! than aborting the analysis.

#![warn(missing_docs)]

pub mod error;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod tasks;

pub use error::{EngineError, Result};
pub use orchestrator::{ImpactOrchestrator, OrchestratorConfig};
pub use report::{ImpactDetails, ImpactReport, ImpactSummary};
pub use runner::{TaskOutcome, TaskRunner};
pub use tasks::{default_tasks, Dimension, FieldKind, FieldSpec, JudgmentTask};
