use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use super::config::RuleConfig;
use crate::scoring::domain::{HeuristicKind, Location, RiskFlag, Transaction};

/// Everything a heuristic predicate may look at. Borrowed for one call only.
pub(crate) struct RuleContext<'a> {
    pub current: &'a Transaction,
    pub previous: &'a [Transaction],
    pub blacklist: &'a BTreeSet<Location>,
    pub config: &'a RuleConfig,
}

/// One row of the rule table: which heuristic, which flag it raises, and the
/// predicate that returns audit notes when it fires.
pub(crate) struct Heuristic {
    pub kind: HeuristicKind,
    pub flag: RiskFlag,
    predicate: fn(&RuleContext<'_>) -> Option<String>,
}

impl Heuristic {
    pub fn evaluate(&self, context: &RuleContext<'_>) -> Option<String> {
        (self.predicate)(context)
    }
}

pub(crate) static HEURISTICS: [Heuristic; 4] = [
    Heuristic {
        kind: HeuristicKind::HighAmount,
        flag: RiskFlag::Fraudulent,
        predicate: high_amount,
    },
    Heuristic {
        kind: HeuristicKind::Velocity,
        flag: RiskFlag::Blocked,
        predicate: velocity,
    },
    Heuristic {
        kind: HeuristicKind::RapidLocationChange,
        flag: RiskFlag::Fraudulent,
        predicate: rapid_location_change,
    },
    Heuristic {
        kind: HeuristicKind::BlacklistedLocation,
        flag: RiskFlag::Blocked,
        predicate: blacklisted_location,
    },
];

pub(crate) fn heuristic(kind: HeuristicKind) -> &'static Heuristic {
    match kind {
        HeuristicKind::HighAmount => &HEURISTICS[0],
        HeuristicKind::Velocity => &HEURISTICS[1],
        HeuristicKind::RapidLocationChange => &HEURISTICS[2],
        HeuristicKind::BlacklistedLocation => &HEURISTICS[3],
    }
}

/// Whole minutes from `previous` to `current`, truncated. `None` when the
/// previous transaction is dated after the current one.
pub(crate) fn elapsed_minutes(current: DateTime<Utc>, previous: DateTime<Utc>) -> Option<i64> {
    let elapsed = current.signed_duration_since(previous);
    if elapsed < Duration::zero() {
        return None;
    }
    Some(elapsed.num_minutes())
}

fn within_window(current: &Transaction, previous: &Transaction, window_minutes: i64) -> bool {
    elapsed_minutes(current.timestamp(), previous.timestamp())
        .map(|minutes| minutes < window_minutes)
        .unwrap_or(false)
}

fn high_amount(context: &RuleContext<'_>) -> Option<String> {
    let amount = context.current.amount();
    let threshold = context.config.amount_threshold;
    (amount > threshold)
        .then(|| format!("amount {amount:.2} exceeds threshold {threshold:.2}"))
}

fn velocity(context: &RuleContext<'_>) -> Option<String> {
    let window = context.config.velocity_window_minutes;
    let limit = context.config.velocity_max_transactions;
    let recent = context
        .previous
        .iter()
        .filter(|previous| within_window(context.current, previous, window))
        .count();

    (recent > limit).then(|| {
        format!("{recent} transactions within {window} minutes (limit {limit})")
    })
}

fn rapid_location_change(context: &RuleContext<'_>) -> Option<String> {
    let window = context.config.location_window_minutes;
    let current_location = context.current.location();

    context
        .previous
        .iter()
        .find(|previous| {
            previous.location() != current_location
                && within_window(context.current, previous, window)
        })
        .map(|previous| {
            format!(
                "location changed from {} to {} within {} minutes",
                previous.location(),
                current_location,
                window
            )
        })
}

fn blacklisted_location(context: &RuleContext<'_>) -> Option<String> {
    let location = context.current.location();
    context
        .blacklist
        .contains(location)
        .then(|| format!("location {location} is blacklisted"))
}
