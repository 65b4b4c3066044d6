//! Error type shared by the estimator, the limit calculator and the stream buffer.
//!
//! Rule evaluation itself never fails: a rule that cannot be evaluated for
//! lack of data simply reports no signal. Errors are reserved for invalid
//! inputs and for numeric preconditions that would otherwise leak NaN into
//! downstream comparisons.

use thiserror::Error;

/// Errors produced by `u-spc`.
#[derive(Debug, Error)]
pub enum SpcError {
    /// A sample was constructed with no measurements.
    #[error("sample must contain at least one value")]
    EmptySample,

    /// A measurement was NaN or infinite.
    #[error("non-finite value {value} at position {index}")]
    NonFiniteValue { index: usize, value: f64 },

    /// The computation needs more data points than were supplied.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A sample was appended with a timestamp older than the stream head.
    #[error("timestamp {current} precedes previous sample at {previous}")]
    NonMonotonicTimestamp { previous: i64, current: i64 },

    /// A numeric parameter is outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No tabulated control chart factors exist for this subgroup size.
    #[error("no control chart factors for subgroup size {0} (supported: 2..=10)")]
    UnsupportedSubgroupSize(usize),

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpcError>;
