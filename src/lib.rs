//! # u-spc
//!
//! Statistical process control signal detection over a rolling stream of
//! subgroup samples.
//!
//! Trial control limits are estimated from preliminary data, then every new
//! sample re-runs a set of Western Electric / Nelson style window rules and
//! yields an OK/WARNING/ALERT state per rule.
//!
//! ## Modules
//!
//! - [`sample`]: subgroup samples and the bounded sample stream
//! - [`stats`]: OLS fit, alternation test, normalized entropy
//! - [`spc`]: parameter estimation, control limits, run rules, signal states
//! - [`capability`]: process capability ratio
//! - [`monitor`]: stream-owning monitor that bootstraps limits
//! - [`config`]: evaluation settings and rule thresholds (TOML)
//!
//! ## Example
//!
//! ```
//! use u_spc::{Sample, SignalConfig};
//! use u_spc::spc::{evaluate_signals, sigma_limits, RuleId, RuleStateMap, SignalState};
//!
//! let limits = sigma_limits(10.0, 1.0, 1).unwrap();
//! let stream = vec![
//!     Sample::new(1_000, vec![10.2]).unwrap(),
//!     Sample::new(2_000, vec![9.7]).unwrap(),
//!     Sample::new(3_000, vec![13.4]).unwrap(),
//! ];
//! let config = SignalConfig::default();
//! let signals = evaluate_signals(&stream, &RuleStateMap::default(), &limits, &config);
//! assert_eq!(signals.get(RuleId::PointOutsideControl).state, SignalState::Alert);
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod monitor;
pub mod sample;
pub mod spc;
pub mod stats;

pub use config::{RuleThresholds, SignalConfig};
pub use error::{Result, SpcError};
pub use monitor::SignalMonitor;
pub use sample::{Sample, SampleStream};
