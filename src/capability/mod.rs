//! Process capability.
//!
//! Relates the specification width to the spread of the process as seen
//! through the range-based dispersion estimate.
//!
//! - [`compute_pcr`]: process capability ratio (USL − LSL) / (6σ̂)
//! - [`spec_width_usage`]: share of a unit tolerance consumed by the process
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod ratio;

pub use ratio::{compute_pcr, spec_width_usage};
