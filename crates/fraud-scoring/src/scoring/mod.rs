//! Transaction fraud scoring: validated inputs, the heuristic table, and the
//! adapters (CSV history import, HTTP router) that feed it.

pub mod domain;
pub mod engine;
pub mod guard;
pub mod history;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{HeuristicKind, Location, RiskFlag, Transaction, TransactionSubmission};
pub use engine::{FraudAssessment, FraudScorer, HeuristicHit, RecommendedAction, RuleConfig};
pub use guard::{
    AssessmentInputs, AssessmentRequest, InvalidInput, TransactionGuard, DEFAULT_MAX_HISTORY,
};
pub use history::{HistoryImportError, HistoryImporter};
pub use router::assessment_router;
pub use service::{AssessmentView, FraudAssessmentService};
