//! Application configuration

use application::services::{DigestServiceConfig, IdleCohortPolicy};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Digest job configuration
    #[serde(default)]
    pub digest: DigestConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Digest job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Rolling statistics period in days
    #[serde(default = "default_stats_period_days")]
    pub stats_period_days: i64,

    /// Mentor-activeness lookback in days
    ///
    /// Must be at least `stats_period_days`; a run with a shorter lookback
    /// fails validation before any digest is dispatched.
    #[serde(default = "default_active_lookback_days")]
    pub active_lookback_days: i64,

    /// Minimum days between two digests to the same mentor
    #[serde(default = "default_throttle_days")]
    pub throttle_days: i64,

    /// Whether zero-activity cohorts appear in a mentor's digest
    #[serde(default)]
    pub idle_cohorts: IdleCohortPolicy,

    /// Replacement text for the built-in first-digest introduction
    #[serde(default)]
    pub introduction: Option<String>,
}

const fn default_stats_period_days() -> i64 {
    7
}

const fn default_active_lookback_days() -> i64 {
    21
}

const fn default_throttle_days() -> i64 {
    6
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            stats_period_days: default_stats_period_days(),
            active_lookback_days: default_active_lookback_days(),
            throttle_days: default_throttle_days(),
            idle_cohorts: IdleCohortPolicy::default(),
            introduction: None,
        }
    }
}

impl DigestConfig {
    /// Convert to the application layer's service configuration
    #[must_use]
    pub fn service_config(&self) -> DigestServiceConfig {
        DigestServiceConfig {
            stats_period_days: self.stats_period_days,
            active_lookback_days: self.active_lookback_days,
            throttle_days: self.throttle_days,
            idle_cohorts: self.idle_cohorts,
            introduction: self.introduction.clone(),
        }
    }
}

/// Environment source for overrides
///
/// A double-underscore separator keeps the nesting boundary unambiguous
/// against the snake_case field names: `MENTORPULSE_DIGEST__THROTTLE_DAYS`
/// addresses `digest.throttle_days`.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("MENTORPULSE")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("mentorpulse").required(false))
            // Override with environment variables (e.g., MENTORPULSE_DIGEST__THROTTLE_DAYS)
            .add_source(env_source());

        let config = builder.build()?;
        config.try_deserialize()
    }
}
