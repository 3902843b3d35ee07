use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::scoring::domain::HeuristicKind;

pub const DEFAULT_AMOUNT_THRESHOLD: f64 = 10_000.0;
pub const DEFAULT_VELOCITY_WINDOW_MINUTES: i64 = 60;
pub const DEFAULT_VELOCITY_MAX_TRANSACTIONS: usize = 10;
pub const DEFAULT_LOCATION_WINDOW_MINUTES: i64 = 30;

/// Thresholds, windows and point weights for the heuristic table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub amount_threshold: f64,
    pub velocity_window_minutes: i64,
    pub velocity_max_transactions: usize,
    pub location_window_minutes: i64,
    pub high_amount_points: u32,
    pub velocity_points: u32,
    pub location_change_points: u32,
    pub blacklist_points: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            amount_threshold: DEFAULT_AMOUNT_THRESHOLD,
            velocity_window_minutes: DEFAULT_VELOCITY_WINDOW_MINUTES,
            velocity_max_transactions: DEFAULT_VELOCITY_MAX_TRANSACTIONS,
            location_window_minutes: DEFAULT_LOCATION_WINDOW_MINUTES,
            high_amount_points: 50,
            velocity_points: 30,
            location_change_points: 20,
            blacklist_points: 100,
        }
    }
}

impl RuleConfig {
    pub fn points_for(&self, kind: HeuristicKind) -> u32 {
        match kind {
            HeuristicKind::HighAmount => self.high_amount_points,
            HeuristicKind::Velocity => self.velocity_points,
            HeuristicKind::RapidLocationChange => self.location_change_points,
            HeuristicKind::BlacklistedLocation => self.blacklist_points,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.amount_threshold.is_finite() || self.amount_threshold < 0.0 {
            return Err(ConfigError::InvalidRule {
                field: "amount_threshold",
                reason: "must be a finite, non-negative amount",
            });
        }
        if self.velocity_window_minutes <= 0 {
            return Err(ConfigError::InvalidRule {
                field: "velocity_window_minutes",
                reason: "must be greater than zero",
            });
        }
        if self.location_window_minutes <= 0 {
            return Err(ConfigError::InvalidRule {
                field: "location_window_minutes",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}
