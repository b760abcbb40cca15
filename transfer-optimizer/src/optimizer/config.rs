//! Transfer optimization configuration.

use chrono::Duration;
use serde::Deserialize;

/// Error from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Configuration parameters for transfer optimization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransferOptimizationConfig {
    /// Prefer transfers with a better constraint (stay-seated, guaranteed,
    /// preferred) over cheaper ones.
    pub optimize_transfer_priority: bool,

    /// Add the wait-time cost to the generalized cost when ranking.
    pub optimize_transfer_wait_time: bool,

    /// How much more a zero-wait transfer costs than one at the min safe
    /// transfer time. Must be at least 1.
    pub min_safe_wait_time_factor: f64,

    /// Weight of the per-stop board/alight costs. Zero disables them.
    pub extra_stop_board_alight_costs_factor: f64,

    /// Fixed wait-time cost of a guaranteed transfer (seconds).
    pub guaranteed_transfer_cost: i32,

    /// Fixed wait-time cost of a stay-seated transfer (seconds).
    pub stay_seated_transfer_cost: i32,
}

impl TransferOptimizationConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        optimize_transfer_priority: bool,
        optimize_transfer_wait_time: bool,
        min_safe_wait_time_factor: f64,
        extra_stop_board_alight_costs_factor: f64,
        guaranteed_transfer_cost: i32,
        stay_seated_transfer_cost: i32,
    ) -> Self {
        Self {
            optimize_transfer_priority,
            optimize_transfer_wait_time,
            min_safe_wait_time_factor,
            extra_stop_board_alight_costs_factor,
            guaranteed_transfer_cost,
            stay_seated_transfer_cost,
        }
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the JSON is malformed, has unknown fields, or a
    /// value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_optimizer::optimizer::TransferOptimizationConfig;
    ///
    /// let config = TransferOptimizationConfig::from_json(
    ///     r#"{ "optimize_transfer_wait_time": false, "min_safe_wait_time_factor": 2.5 }"#,
    /// )
    /// .unwrap();
    /// assert!(!config.optimize_transfer_wait_time);
    /// assert!(config.optimize_transfer_priority);
    /// assert_eq!(config.min_safe_wait_time_factor, 2.5);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_safe_wait_time_factor.is_nan() || self.min_safe_wait_time_factor < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_safe_wait_time_factor",
                reason: format!("must be at least 1, was {}", self.min_safe_wait_time_factor),
            });
        }
        let factor = self.extra_stop_board_alight_costs_factor;
        if factor.is_nan() || factor < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "extra_stop_board_alight_costs_factor",
                reason: format!("must be non-negative, was {factor}"),
            });
        }
        for (field, value) in [
            ("guaranteed_transfer_cost", self.guaranteed_transfer_cost),
            ("stay_seated_transfer_cost", self.stay_seated_transfer_cost),
        ] {
            if value < 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be non-negative, was {value}"),
                });
            }
        }
        Ok(())
    }

    /// Returns the guaranteed transfer cost as a Duration.
    pub fn guaranteed_transfer(&self) -> Duration {
        Duration::seconds(i64::from(self.guaranteed_transfer_cost))
    }

    /// Returns the stay-seated transfer cost as a Duration.
    pub fn stay_seated_transfer(&self) -> Duration {
        Duration::seconds(i64::from(self.stay_seated_transfer_cost))
    }
}

impl Default for TransferOptimizationConfig {
    fn default() -> Self {
        Self {
            optimize_transfer_priority: true,
            optimize_transfer_wait_time: true,
            min_safe_wait_time_factor: 5.0,
            extra_stop_board_alight_costs_factor: 0.0,
            guaranteed_transfer_cost: 0,
            stay_seated_transfer_cost: 0,
        }
    }
}
