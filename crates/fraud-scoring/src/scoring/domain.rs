use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::guard::InvalidInput;

const MAX_LOCATION_LEN: usize = 64;

/// Region or city code attached to a transaction (e.g. `SP`, `RJ`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Trim and validate a caller supplied location code.
    pub fn parse(raw: &str) -> Result<Self, InvalidInput> {
        let trimmed = raw.trim();
        let malformed = trimmed.is_empty()
            || trimmed.chars().count() > MAX_LOCATION_LEN
            || trimmed
                .chars()
                .any(|ch| ch.is_whitespace() || ch.is_control());

        if malformed {
            return Err(InvalidInput::MalformedLocation(raw.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Location {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

/// A validated transaction. Fields are fixed once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionSubmission")]
pub struct Transaction {
    amount: f64,
    timestamp: DateTime<Utc>,
    location: Location,
}

impl Transaction {
    pub fn new(
        amount: f64,
        timestamp: DateTime<Utc>,
        location: Location,
    ) -> Result<Self, InvalidInput> {
        if !amount.is_finite() {
            return Err(InvalidInput::NonFiniteAmount);
        }
        if amount < 0.0 {
            return Err(InvalidInput::NegativeAmount(amount));
        }

        Ok(Self {
            amount,
            timestamp,
            location,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Raw transaction as received from callers, prior to validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSubmission {
    pub amount: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub location: String,
}

impl TryFrom<TransactionSubmission> for Transaction {
    type Error = InvalidInput;

    fn try_from(submission: TransactionSubmission) -> Result<Self, Self::Error> {
        let timestamp = submission.timestamp.ok_or(InvalidInput::MissingTimestamp)?;
        let location = Location::parse(&submission.location)?;
        Transaction::new(submission.amount, timestamp, location)
    }
}

impl From<&Transaction> for TransactionSubmission {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount,
            timestamp: Some(transaction.timestamp),
            location: transaction.location.0.clone(),
        }
    }
}

/// The heuristics applied to every transaction, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    HighAmount,
    Velocity,
    RapidLocationChange,
    BlacklistedLocation,
}

impl HeuristicKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HighAmount,
            Self::Velocity,
            Self::RapidLocationChange,
            Self::BlacklistedLocation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighAmount => "High amount",
            Self::Velocity => "Transaction velocity",
            Self::RapidLocationChange => "Rapid location change",
            Self::BlacklistedLocation => "Blacklisted location",
        }
    }
}

/// Output flag a heuristic raises when it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Blocked,
    Fraudulent,
}
