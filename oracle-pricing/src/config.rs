//! Estimator configuration

use oracle_core::{OracleError, OracleResult, Resolution};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Windows and ratios used by the estimator's fallback cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Hourly window for the first, most recent look at trades
    #[serde(default = "default_recent_hours")]
    pub recent_hours: u32,
    /// Share of the recent distribution to average
    #[serde(default = "default_recent_ratio")]
    pub recent_ratio: f64,
    /// Hourly window for the wider second look
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
    /// Share of the wider distribution to average, highest prices first
    #[serde(default = "default_window_ratio")]
    pub window_ratio: f64,
    /// How many buy orders to return when no trades are available
    #[serde(default = "default_buy_depth")]
    pub buy_depth: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            recent_hours: default_recent_hours(),
            recent_ratio: default_recent_ratio(),
            window_hours: default_window_hours(),
            window_ratio: default_window_ratio(),
            buy_depth: default_buy_depth(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Reads:
    /// - ORACLE_RECENT_HOURS
    /// - ORACLE_RECENT_RATIO
    /// - ORACLE_WINDOW_HOURS
    /// - ORACLE_WINDOW_RATIO
    /// - ORACLE_BUY_DEPTH
    pub fn from_env() -> OracleResult<Self> {
        let defaults = Self::default();

        let config = Self {
            recent_hours: env_or("ORACLE_RECENT_HOURS", defaults.recent_hours)?,
            recent_ratio: env_or("ORACLE_RECENT_RATIO", defaults.recent_ratio)?,
            window_hours: env_or("ORACLE_WINDOW_HOURS", defaults.window_hours)?,
            window_ratio: env_or("ORACLE_WINDOW_RATIO", defaults.window_ratio)?,
            buy_depth: env_or("ORACLE_BUY_DEPTH", defaults.buy_depth)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Ratios must lie in (0, 1], windows within the hourly feed's coverage,
    /// and depth non-zero
    pub fn validate(&self) -> OracleResult<()> {
        for (name, ratio) in [("recent_ratio", self.recent_ratio), ("window_ratio", self.window_ratio)] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(OracleError::config(format!("{} must be in (0, 1], got {}", name, ratio)));
            }
        }

        let coverage = Resolution::Hourly.coverage();
        for (name, hours) in [("recent_hours", self.recent_hours), ("window_hours", self.window_hours)] {
            if hours == 0 || hours > coverage {
                return Err(OracleError::config(format!(
                    "{} must be between 1 and {}, got {}",
                    name, coverage, hours
                )));
            }
        }

        if self.buy_depth == 0 {
            return Err(OracleError::config("buy_depth must be at least 1"));
        }

        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> OracleResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| OracleError::config(format!("{}={:?}: {}", key, value, e))),
        Err(_) => Ok(default),
    }
}

fn default_recent_hours() -> u32 {
    3
}

fn default_recent_ratio() -> f64 {
    1.0
}

fn default_window_hours() -> u32 {
    48
}

fn default_window_ratio() -> f64 {
    0.3
}

fn default_buy_depth() -> usize {
    5
}
