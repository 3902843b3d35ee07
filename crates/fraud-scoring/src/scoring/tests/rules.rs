use super::common::*;
use chrono::Duration;

use crate::scoring::domain::{HeuristicKind, RiskFlag};
use crate::scoring::engine::elapsed_minutes;

#[test]
fn elapsed_minutes_truncates_partial_minutes() {
    let at = now();
    assert_eq!(elapsed_minutes(at, at), Some(0));
    assert_eq!(
        elapsed_minutes(at, at - Duration::seconds(59 * 60 + 59)),
        Some(59)
    );
    assert_eq!(elapsed_minutes(at, at - Duration::minutes(60)), Some(60));
}

#[test]
fn elapsed_minutes_rejects_future_transactions() {
    let at = now();
    assert_eq!(elapsed_minutes(at, at + Duration::seconds(1)), None);
    assert_eq!(elapsed_minutes(at, at + Duration::minutes(5)), None);
}

#[test]
fn high_amount_requires_strictly_greater_amount() {
    let scorer = scorer();
    let kind = HeuristicKind::HighAmount;

    assert!(scorer
        .evaluate_heuristic(kind, &current(AMOUNT_THRESHOLD), &[], &no_blacklist())
        .is_none());

    let hit = scorer
        .evaluate_heuristic(kind, &current(AMOUNT_THRESHOLD + 0.01), &[], &no_blacklist())
        .expect("high amount fires");
    assert_eq!(hit.points, 50);
    assert_eq!(hit.flag, RiskFlag::Fraudulent);
    assert!(hit.notes.contains("exceeds threshold"));
}

#[test]
fn velocity_needs_more_than_ten_recent_transactions() {
    let scorer = scorer();
    let kind = HeuristicKind::Velocity;
    let ten = vec![minutes_ago(10.0, 59, "SP"); 10];
    let eleven = vec![minutes_ago(10.0, 59, "SP"); 11];

    assert!(scorer
        .evaluate_heuristic(kind, &current(10.0), &ten, &no_blacklist())
        .is_none());

    let hit = scorer
        .evaluate_heuristic(kind, &current(10.0), &eleven, &no_blacklist())
        .expect("velocity fires");
    assert_eq!(hit.points, 30);
    assert_eq!(hit.flag, RiskFlag::Blocked);
    assert!(hit.notes.starts_with("11 transactions"));
}

#[test]
fn velocity_window_boundary_is_exclusive() {
    let scorer = scorer();
    let at_boundary = vec![minutes_ago(10.0, 60, "SP"); 11];

    assert!(scorer
        .evaluate_heuristic(
            HeuristicKind::Velocity,
            &current(10.0),
            &at_boundary,
            &no_blacklist()
        )
        .is_none());
}

#[test]
fn velocity_counts_only_entries_inside_window() {
    let scorer = scorer();
    let mut history = vec![minutes_ago(10.0, 5, "SP"); 10];
    history.extend(vec![minutes_ago(10.0, 61, "SP"); 5]);
    history.extend(vec![transaction_at(10.0, now() + Duration::minutes(1), "SP"); 5]);

    assert!(scorer
        .evaluate_heuristic(HeuristicKind::Velocity, &current(10.0), &history, &no_blacklist())
        .is_none());
}

#[test]
fn location_change_requires_recent_different_location() {
    let scorer = scorer();
    let kind = HeuristicKind::RapidLocationChange;

    let same_place = vec![minutes_ago(10.0, 29, "SP")];
    assert!(scorer
        .evaluate_heuristic(kind, &current(10.0), &same_place, &no_blacklist())
        .is_none());

    let elsewhere = vec![minutes_ago(10.0, 29, "RJ")];
    let hit = scorer
        .evaluate_heuristic(kind, &current(10.0), &elsewhere, &no_blacklist())
        .expect("location change fires");
    assert_eq!(hit.points, 20);
    assert_eq!(hit.flag, RiskFlag::Fraudulent);
    assert!(hit.notes.contains("RJ to SP"));
}

#[test]
fn location_change_window_boundary_is_exclusive() {
    let scorer = scorer();
    let kind = HeuristicKind::RapidLocationChange;

    let at_boundary = vec![minutes_ago(10.0, 30, "RJ")];
    assert!(scorer
        .evaluate_heuristic(kind, &current(10.0), &at_boundary, &no_blacklist())
        .is_none());

    let future = vec![transaction_at(10.0, now() + Duration::minutes(2), "RJ")];
    assert!(scorer
        .evaluate_heuristic(kind, &current(10.0), &future, &no_blacklist())
        .is_none());
}

#[test]
fn blacklist_matches_exact_location_codes() {
    let scorer = scorer();
    let kind = HeuristicKind::BlacklistedLocation;

    assert!(scorer
        .evaluate_heuristic(kind, &current(10.0), &[], &blacklist(&["sp", "RJ"]))
        .is_none());

    let hit = scorer
        .evaluate_heuristic(kind, &current(10.0), &[], &blacklist(&["SP"]))
        .expect("blacklist fires");
    assert_eq!(hit.points, 100);
    assert_eq!(hit.flag, RiskFlag::Blocked);
}
