//! Process parameter estimation from a preliminary window of subgroups.

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{Result, SpcError};
use crate::sample::Sample;

/// Estimated process location and dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Grand mean (average of subgroup means).
    pub mean: f64,
    /// Dispersion estimate: the average subgroup range (R-bar).
    pub std: f64,
}

/// Estimates process parameters from preliminary subgroups.
///
/// The mean is the average of the subgroup means. Dispersion uses the
/// average subgroup range rather than a pooled variance, the usual choice
/// for small subgroups; divide by d2 to obtain sigma when needed.
///
/// # Errors
///
/// [`SpcError::InsufficientData`] if `samples` is empty.
///
/// # Examples
///
/// ```
/// use u_spc::{Sample, spc::estimate_parameters};
///
/// let samples = vec![
///     Sample::new(0, vec![1.0, 2.0, 3.0]).unwrap(),
///     Sample::new(1, vec![2.0, 3.0, 4.0]).unwrap(),
/// ];
/// let p = estimate_parameters(&samples).unwrap();
/// assert!((p.mean - 2.5).abs() < 1e-12);
/// assert!((p.std - 2.0).abs() < 1e-12);
/// ```
pub fn estimate_parameters(samples: &[Sample]) -> Result<ProcessParameters> {
    let empty = || SpcError::InsufficientData { needed: 1, got: 0 };
    if samples.is_empty() {
        return Err(empty());
    }
    let means: Vec<f64> = samples.iter().map(Sample::mean).collect();
    let ranges: Vec<f64> = samples.iter().map(Sample::range).collect();
    let mean = stats::mean(&means).ok_or_else(empty)?;
    let std = stats::mean(&ranges).ok_or_else(empty)?;
    Ok(ProcessParameters { mean, std })
}
