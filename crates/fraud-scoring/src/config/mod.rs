use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::scoring::{RuleConfig, TransactionGuard, DEFAULT_MAX_HISTORY};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub rules: RuleConfig,
    /// Upper bound on previous transactions accepted per assessment.
    pub max_history: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rules = load_rules()?;

        let max_history = env_override("FRAUD_MAX_HISTORY", DEFAULT_MAX_HISTORY)?;
        if max_history == 0 {
            return Err(ConfigError::InvalidRule {
                field: "max_history",
                reason: "must be greater than zero",
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            rules,
            max_history,
        })
    }

    /// Input guard sized by the configured history limit.
    pub fn guard(&self) -> TransactionGuard {
        TransactionGuard::with_max_history(self.max_history)
    }
}

fn load_rules() -> Result<RuleConfig, ConfigError> {
    let defaults = RuleConfig::default();
    let rules = RuleConfig {
        amount_threshold: env_override("FRAUD_AMOUNT_THRESHOLD", defaults.amount_threshold)?,
        velocity_window_minutes: env_override(
            "FRAUD_VELOCITY_WINDOW_MINUTES",
            defaults.velocity_window_minutes,
        )?,
        velocity_max_transactions: env_override(
            "FRAUD_VELOCITY_MAX_TRANSACTIONS",
            defaults.velocity_max_transactions,
        )?,
        location_window_minutes: env_override(
            "FRAUD_LOCATION_WINDOW_MINUTES",
            defaults.location_window_minutes,
        )?,
        ..defaults
    };
    rules.validate()?;
    Ok(rules)
}

fn env_override<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidRuleOverride { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRuleOverride { key: &'static str, value: String },
    InvalidRule { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRuleOverride { key, value } => {
                write!(f, "{key} has an unparseable value '{value}'")
            }
            ConfigError::InvalidRule { field, reason } => {
                write!(f, "rule setting {field} {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRuleOverride { .. }
            | ConfigError::InvalidRule { .. } => None,
        }
    }
}
