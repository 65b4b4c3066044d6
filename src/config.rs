//! Engine configuration.
//!
//! [`SignalConfig`] carries the polling cadence, window sizes and the
//! heuristic thresholds used by the trend, non-randomness and near-limit
//! rules. Every field has a default, so a partial TOML document is enough:
//!
//! ```
//! use u_spc::SignalConfig;
//!
//! let config = SignalConfig::from_toml_str(
//!     r#"
//!     polling_interval_ms = 1000
//!
//!     [thresholds]
//!     trend_slope = 0.8
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.polling_interval_ms, 1000);
//! assert_eq!(config.evaluation_window, 20);
//! assert!((config.thresholds.trend_slope - 0.8).abs() < f64::EPSILON);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpcError};

/// Minimum R² for a window to count as a linear trend.
pub const DEFAULT_TREND_R_SQUARED: f64 = 0.7;

/// Minimum |slope| of the scaled trend fit. With x and y on the same range a
/// slope of 1 is a 45° line.
pub const DEFAULT_TREND_SLOPE: f64 = 0.6;

/// Normalized entropy below which a window is considered non-random.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 0.5;

/// Relative half-width of the band around each limit for the near-limit rule.
pub const DEFAULT_NEAR_LIMIT_TOLERANCE: f64 = 0.02;

/// Tunable thresholds of the heuristic rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// R² lower bound for six-trend (exclusive).
    pub trend_r_squared: f64,
    /// |slope| lower bound for six-trend (exclusive).
    pub trend_slope: f64,
    /// Entropy upper bound for non-random (exclusive).
    pub entropy: f64,
    /// Near-limit band half-width as a fraction of the limit's magnitude.
    pub near_limit_tolerance: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            trend_r_squared: DEFAULT_TREND_R_SQUARED,
            trend_slope: DEFAULT_TREND_SLOPE,
            entropy: DEFAULT_ENTROPY_THRESHOLD,
            near_limit_tolerance: DEFAULT_NEAR_LIMIT_TOLERANCE,
        }
    }
}

/// Configuration for signal evaluation and the sample monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Sampling cadence of the caller in the same unit as sample timestamps.
    /// Signals whose onset is newer than this are debounced.
    pub polling_interval_ms: i64,
    /// Number of trailing samples the rules look at.
    pub evaluation_window: usize,
    /// Number of samples the monitor retains.
    pub history_capacity: usize,
    /// Number of samples collected before trial limits are estimated.
    pub preliminary_size: usize,
    /// Heuristic rule thresholds.
    pub thresholds: RuleThresholds,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: 500,
            evaluation_window: 20,
            history_capacity: 100,
            preliminary_size: 20,
            thresholds: RuleThresholds::default(),
        }
    }
}

impl SignalConfig {
    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_polling_interval(mut self, interval_ms: i64) -> Self {
        self.polling_interval_ms = interval_ms;
        self
    }

    pub fn with_evaluation_window(mut self, window: usize) -> Self {
        self.evaluation_window = window;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_preliminary_size(mut self, size: usize) -> Self {
        self.preliminary_size = size;
        self
    }

    pub fn with_thresholds(mut self, thresholds: RuleThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.polling_interval_ms < 0 {
            return Err(invalid("polling_interval_ms must be non-negative"));
        }
        if self.evaluation_window == 0 {
            return Err(invalid("evaluation_window must be positive"));
        }
        if self.history_capacity < self.evaluation_window {
            return Err(invalid("history_capacity must be >= evaluation_window"));
        }
        if self.preliminary_size == 0 || self.preliminary_size > self.history_capacity {
            return Err(invalid("preliminary_size must be in 1..=history_capacity"));
        }
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.trend_r_squared) {
            return Err(invalid("thresholds.trend_r_squared must be in [0, 1]"));
        }
        if !t.trend_slope.is_finite() || t.trend_slope < 0.0 {
            return Err(invalid("thresholds.trend_slope must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&t.entropy) {
            return Err(invalid("thresholds.entropy must be in [0, 1]"));
        }
        if !t.near_limit_tolerance.is_finite() || t.near_limit_tolerance < 0.0 {
            return Err(invalid(
                "thresholds.near_limit_tolerance must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SpcError {
    SpcError::InvalidParameter(msg.to_string())
}
