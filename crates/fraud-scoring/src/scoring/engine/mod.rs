mod config;
mod policy;
mod rules;

pub use config::{
    RuleConfig, DEFAULT_AMOUNT_THRESHOLD, DEFAULT_LOCATION_WINDOW_MINUTES,
    DEFAULT_VELOCITY_MAX_TRANSACTIONS, DEFAULT_VELOCITY_WINDOW_MINUTES,
};
pub use policy::RecommendedAction;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{HeuristicKind, Location, RiskFlag, Transaction};
use super::guard::AssessmentInputs;
use rules::{RuleContext, HEURISTICS};

#[cfg(test)]
pub(crate) use rules::elapsed_minutes;

/// Stateless scorer applying the heuristic table to one transaction at a time.
#[derive(Debug, Clone, Default)]
pub struct FraudScorer {
    config: RuleConfig,
}

impl FraudScorer {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Run every heuristic against the transaction and its recent history.
    ///
    /// History order is irrelevant and nothing is retained between calls.
    pub fn check_for_fraud(
        &self,
        current_transaction: &Transaction,
        previous_transactions: &[Transaction],
        blacklisted_locations: &BTreeSet<Location>,
    ) -> FraudAssessment {
        let context = RuleContext {
            current: current_transaction,
            previous: previous_transactions,
            blacklist: blacklisted_locations,
            config: &self.config,
        };

        let triggered = HEURISTICS
            .iter()
            .filter_map(|heuristic| {
                heuristic.evaluate(&context).map(|notes| {
                    let points = self.config.points_for(heuristic.kind);
                    debug!(heuristic = ?heuristic.kind, points, %notes, "heuristic triggered");
                    HeuristicHit {
                        heuristic: heuristic.kind,
                        points,
                        flag: heuristic.flag,
                        notes,
                    }
                })
            })
            .collect::<Vec<_>>();

        let assessment = policy::aggregate(triggered);
        debug!(
            risk_score = assessment.risk_score,
            blocked = assessment.is_blocked,
            fraudulent = assessment.is_fraudulent,
            history = previous_transactions.len(),
            "transaction assessed"
        );
        assessment
    }

    pub fn assess(&self, inputs: &AssessmentInputs) -> FraudAssessment {
        self.check_for_fraud(
            &inputs.transaction,
            &inputs.previous_transactions,
            &inputs.blacklisted_locations,
        )
    }

    /// Evaluate a single heuristic in isolation.
    pub fn evaluate_heuristic(
        &self,
        kind: HeuristicKind,
        current_transaction: &Transaction,
        previous_transactions: &[Transaction],
        blacklisted_locations: &BTreeSet<Location>,
    ) -> Option<HeuristicHit> {
        let heuristic = rules::heuristic(kind);
        let context = RuleContext {
            current: current_transaction,
            previous: previous_transactions,
            blacklist: blacklisted_locations,
            config: &self.config,
        };

        heuristic.evaluate(&context).map(|notes| HeuristicHit {
            heuristic: kind,
            points: self.config.points_for(kind),
            flag: heuristic.flag,
            notes,
        })
    }
}

/// Audit entry for a heuristic that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicHit {
    pub heuristic: HeuristicKind,
    pub points: u32,
    pub flag: RiskFlag,
    pub notes: String,
}

/// Composite result of one scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FraudAssessment {
    is_blocked: bool,
    is_fraudulent: bool,
    verification_required: bool,
    risk_score: u32,
    triggered: Vec<HeuristicHit>,
}

impl FraudAssessment {
    pub fn is_blocked(&self) -> bool {
        self.is_blocked
    }

    pub fn is_fraudulent(&self) -> bool {
        self.is_fraudulent
    }

    pub fn verification_required(&self) -> bool {
        self.verification_required
    }

    pub fn risk_score(&self) -> u32 {
        self.risk_score
    }

    pub fn triggered(&self) -> &[HeuristicHit] {
        &self.triggered
    }

    pub fn has_triggered(&self, kind: HeuristicKind) -> bool {
        self.triggered.iter().any(|hit| hit.heuristic == kind)
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        policy::recommend(self)
    }

    pub fn summary(&self) -> String {
        policy::summarize(self)
    }
}
