//! Statistical Process Control (SPC) signal detection.
//!
//! # Limits
//!
//! - [`estimate_parameters`]: grand mean and average range from preliminary subgroups
//! - [`chart_limits`]: X-bar and R chart limits from the A2/D3/D4 factor tables
//! - [`sigma_limits`]: X-bar limits from a known mean and sigma
//! - [`compute_arl`]: average run length for a given β risk
//!
//! # Run Rules
//!
//! Ten window detectors identified by [`RuleId`]: the four Western Electric
//! zone rules, the remaining Nelson patterns (trend, zone C hugging,
//! alternation, mixture) plus an entropy-based non-randomness check and a
//! near-limit check.
//!
//! # Signals
//!
//! [`evaluate_signals`] runs every rule on the trailing window and reports an
//! OK/WARNING/ALERT [`RuleState`] per rule with the pattern's onset.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587, Standard Practice for Use of Control Charts
//! - Nelson, L.S. (1984). "The Shewhart Control Chart: Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod chart;
mod estimate;
mod rules;
mod signal;

pub use chart::{
    chart_limits, compute_arl, compute_control_limits, sigma_limits, ChartFactors, ChartLimits,
    ControlLimits,
};
pub use estimate::{estimate_parameters, ProcessParameters};
pub use rules::{
    alternating_points, non_random_points, points_in_limit, points_with_trend, LimitCriterion,
    RuleId, Side, Trend, WindowCheck,
};
pub use signal::{evaluate_signals, state_from_windows, RuleState, RuleStateMap, SignalState};
