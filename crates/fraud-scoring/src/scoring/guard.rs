use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Location, Transaction, TransactionSubmission};

/// Caller contract violations, raised before any heuristic runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("transaction amount must not be negative (found {0})")]
    NegativeAmount(f64),
    #[error("transaction amount must be a finite number")]
    NonFiniteAmount,
    #[error("transaction timestamp is missing")]
    MissingTimestamp,
    #[error("malformed location identifier {0:?}")]
    MalformedLocation(String),
    #[error("previous transaction #{index} is invalid: {source}")]
    PreviousTransaction {
        index: usize,
        #[source]
        source: Box<InvalidInput>,
    },
    #[error("blacklist entry #{index} is invalid: {source}")]
    BlacklistEntry {
        index: usize,
        #[source]
        source: Box<InvalidInput>,
    },
    #[error("transaction history too large (limit {limit}, found {found})")]
    HistoryTooLarge { limit: usize, found: usize },
}

pub const DEFAULT_MAX_HISTORY: usize = 10_000;

/// Raw scoring request as it arrives over HTTP or from the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub transaction: TransactionSubmission,
    #[serde(default)]
    pub previous_transactions: Vec<TransactionSubmission>,
    #[serde(default)]
    pub blacklisted_locations: Vec<String>,
}

/// Validated inputs ready to hand to the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentInputs {
    pub transaction: Transaction,
    pub previous_transactions: Vec<Transaction>,
    pub blacklisted_locations: BTreeSet<Location>,
}

/// Converts raw submissions into validated scoring inputs.
#[derive(Debug, Clone)]
pub struct TransactionGuard {
    max_history: usize,
}

impl Default for TransactionGuard {
    fn default() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }
}

impl TransactionGuard {
    pub fn with_max_history(max_history: usize) -> Self {
        Self { max_history }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn transaction_from_submission(
        &self,
        submission: TransactionSubmission,
    ) -> Result<Transaction, InvalidInput> {
        Transaction::try_from(submission)
    }

    pub fn inputs_from_request(
        &self,
        request: AssessmentRequest,
    ) -> Result<AssessmentInputs, InvalidInput> {
        if request.previous_transactions.len() > self.max_history {
            return Err(InvalidInput::HistoryTooLarge {
                limit: self.max_history,
                found: request.previous_transactions.len(),
            });
        }

        let transaction = self.transaction_from_submission(request.transaction)?;

        let previous_transactions = request
            .previous_transactions
            .into_iter()
            .enumerate()
            .map(|(index, submission)| {
                self.transaction_from_submission(submission)
                    .map_err(|source| InvalidInput::PreviousTransaction {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let blacklisted_locations = request
            .blacklisted_locations
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Location::parse(raw).map_err(|source| InvalidInput::BlacklistEntry {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(AssessmentInputs {
            transaction,
            previous_transactions,
            blacklisted_locations,
        })
    }
}
