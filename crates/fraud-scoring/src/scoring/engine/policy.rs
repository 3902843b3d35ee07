use serde::{Deserialize, Serialize};

use super::{FraudAssessment, HeuristicHit};
use crate::scoring::domain::RiskFlag;

/// What the caller should do with the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Approve,
    StepUpVerification,
    Reject,
}

impl RecommendedAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::StepUpVerification => "step_up_verification",
            Self::Reject => "reject",
        }
    }
}

/// Folds triggered heuristics into an assessment. Contributions are summed
/// without a cap; each flag is the OR of the heuristics targeting it.
pub(crate) fn aggregate(triggered: Vec<HeuristicHit>) -> FraudAssessment {
    let risk_score = triggered
        .iter()
        .fold(0u32, |total, hit| total.saturating_add(hit.points));
    let is_blocked = triggered.iter().any(|hit| hit.flag == RiskFlag::Blocked);
    let is_fraudulent = triggered.iter().any(|hit| hit.flag == RiskFlag::Fraudulent);

    FraudAssessment {
        is_blocked,
        is_fraudulent,
        verification_required: is_fraudulent,
        risk_score,
        triggered,
    }
}

pub(crate) fn recommend(assessment: &FraudAssessment) -> RecommendedAction {
    if assessment.is_blocked {
        RecommendedAction::Reject
    } else if assessment.verification_required {
        RecommendedAction::StepUpVerification
    } else {
        RecommendedAction::Approve
    }
}

pub(crate) fn summarize(assessment: &FraudAssessment) -> String {
    let action = recommend(assessment);
    if assessment.triggered.is_empty() {
        return format!("{}: no heuristics triggered", action.label());
    }

    let reasons = assessment
        .triggered
        .iter()
        .map(|hit| format!("{} (+{})", hit.notes, hit.points))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "{} with risk score {}: {}",
        action.label(),
        assessment.risk_score,
        reasons
    )
}
