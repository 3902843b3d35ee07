use serde::Serialize;
use tracing::info;

use super::engine::{FraudAssessment, FraudScorer, HeuristicHit, RecommendedAction, RuleConfig};
use super::guard::{AssessmentInputs, AssessmentRequest, InvalidInput, TransactionGuard};

/// Service composing the input guard with the scorer.
#[derive(Debug, Clone, Default)]
pub struct FraudAssessmentService {
    guard: TransactionGuard,
    scorer: FraudScorer,
}

impl FraudAssessmentService {
    pub fn new(config: RuleConfig) -> Self {
        Self::with_guard(TransactionGuard::default(), config)
    }

    pub fn with_guard(guard: TransactionGuard, config: RuleConfig) -> Self {
        Self {
            guard,
            scorer: FraudScorer::new(config),
        }
    }

    pub fn guard(&self) -> &TransactionGuard {
        &self.guard
    }

    /// Validate a raw request and score it.
    pub fn assess(&self, request: AssessmentRequest) -> Result<FraudAssessment, InvalidInput> {
        let inputs = self.guard.inputs_from_request(request)?;
        Ok(self.assess_inputs(&inputs))
    }

    /// Score inputs that were already validated, e.g. history loaded from CSV.
    pub fn assess_inputs(&self, inputs: &AssessmentInputs) -> FraudAssessment {
        let assessment = self.scorer.assess(inputs);

        info!(
            location = %inputs.transaction.location(),
            risk_score = assessment.risk_score(),
            action = assessment.recommended_action().label(),
            "fraud assessment completed"
        );

        assessment
    }
}

/// Serialized shape returned to API and CLI callers.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub is_blocked: bool,
    pub is_fraudulent: bool,
    pub verification_required: bool,
    pub risk_score: u32,
    pub action: RecommendedAction,
    pub summary: String,
    pub triggered: Vec<HeuristicHit>,
}

impl From<&FraudAssessment> for AssessmentView {
    fn from(assessment: &FraudAssessment) -> Self {
        Self {
            is_blocked: assessment.is_blocked(),
            is_fraudulent: assessment.is_fraudulent(),
            verification_required: assessment.verification_required(),
            risk_score: assessment.risk_score(),
            action: assessment.recommended_action(),
            summary: assessment.summary(),
            triggered: assessment.triggered().to_vec(),
        }
    }
}
