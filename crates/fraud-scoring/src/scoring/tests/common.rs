use std::collections::BTreeSet;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::scoring::domain::{Location, Transaction, TransactionSubmission};
use crate::scoring::engine::{FraudScorer, RuleConfig};
use crate::scoring::guard::AssessmentRequest;

pub(super) const AMOUNT_THRESHOLD: f64 = 10_000.0;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 11, 21, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn location(code: &str) -> Location {
    Location::parse(code).expect("valid location")
}

pub(super) fn transaction_at(amount: f64, at: DateTime<Utc>, code: &str) -> Transaction {
    Transaction::new(amount, at, location(code)).expect("valid transaction")
}

pub(super) fn minutes_ago(amount: f64, minutes: i64, code: &str) -> Transaction {
    transaction_at(amount, now() - Duration::minutes(minutes), code)
}

pub(super) fn current(amount: f64) -> Transaction {
    transaction_at(amount, now(), "SP")
}

pub(super) fn blacklist(codes: &[&str]) -> BTreeSet<Location> {
    codes.iter().map(|code| location(code)).collect()
}

pub(super) fn no_blacklist() -> BTreeSet<Location> {
    BTreeSet::new()
}

pub(super) fn scorer() -> FraudScorer {
    FraudScorer::new(RuleConfig::default())
}

pub(super) fn submission(amount: f64, minutes: i64, code: &str) -> TransactionSubmission {
    TransactionSubmission {
        amount,
        timestamp: Some(now() - Duration::minutes(minutes)),
        location: code.to_string(),
    }
}

pub(super) fn request() -> AssessmentRequest {
    AssessmentRequest {
        transaction: submission(AMOUNT_THRESHOLD, 0, "SP"),
        previous_transactions: vec![submission(AMOUNT_THRESHOLD, 45, "SP")],
        blacklisted_locations: vec!["XX".to_string()],
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
