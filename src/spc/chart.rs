//! Control limits and the calculators that produce them.
//!
//! Limits are computed once per estimation epoch from a center line and an
//! upper/lower control deviation. Warning limits sit at 2/3 and one-sigma
//! limits at 1/3 of the control deviation, so for a 3-sigma chart they fall
//! on the 2σ and 1σ lines.
//!
//! # Control Chart Factors
//!
//! A2, D3, D4 and d2 are sourced from ASTM E2587, Standard Practice for Use
//! of Control Charts in Statistical Process Control.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587, Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

use super::estimate::ProcessParameters;
use crate::error::{Result, SpcError};

// ---------------------------------------------------------------------------
// Control chart factor tables (ASTM E2587), indexed by subgroup size n=2..10
// Index 0 corresponds to n=2.
// ---------------------------------------------------------------------------

/// A2 factors for X-bar chart limits from the average range.
const A2: [f64; 9] = [1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308];

/// D3 factors for the R chart lower control limit.
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];

/// D4 factors for the R chart upper control limit.
const D4: [f64; 9] = [3.267, 2.575, 2.282, 2.114, 2.004, 1.924, 1.864, 1.816, 1.777];

/// d2 factors (mean of the relative range distribution): sigma-hat = R-bar / d2.
const D2: [f64; 9] = [1.128, 1.693, 2.059, 2.326, 2.534, 2.704, 2.847, 2.970, 3.078];

/// Tabulated factors for X-bar/R charts at one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFactors {
    pub a2: f64,
    pub d3: f64,
    pub d4: f64,
    pub d2: f64,
}

impl ChartFactors {
    /// Looks up the factors for subgroup size `n`.
    ///
    /// # Errors
    ///
    /// [`SpcError::UnsupportedSubgroupSize`] unless `2 <= n <= 10`.
    ///
    /// ```
    /// use u_spc::spc::ChartFactors;
    ///
    /// let f = ChartFactors::for_subgroup_size(5).unwrap();
    /// assert!((f.a2 - 0.577).abs() < 1e-12);
    /// assert!((f.d4 - 2.114).abs() < 1e-12);
    /// assert!(ChartFactors::for_subgroup_size(1).is_err());
    /// ```
    pub fn for_subgroup_size(n: usize) -> Result<Self> {
        if !(2..=10).contains(&n) {
            return Err(SpcError::UnsupportedSubgroupSize(n));
        }
        let idx = n - 2;
        Ok(Self {
            a2: A2[idx],
            d3: D3[idx],
            d4: D4[idx],
            d2: D2[idx],
        })
    }
}

/// Control, warning and one-sigma limits for one chart.
///
/// # Invariants
///
/// - `lcl <= lwl <= l1s <= cl <= u1s <= uwl <= ucl`
/// - All values are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Lower control limit.
    pub lcl: f64,
    /// Upper warning limit (2/3 of the upper deviation).
    pub uwl: f64,
    /// Lower warning limit.
    pub lwl: f64,
    /// Upper one-sigma limit (1/3 of the upper deviation).
    pub u1s: f64,
    /// Lower one-sigma limit.
    pub l1s: f64,
    /// Center line.
    pub cl: f64,
    /// Dispersion estimate the limits were derived from.
    pub std: f64,
}

/// Limits for the subgroup-mean chart and the range chart of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLimits {
    pub xbar: ControlLimits,
    pub range: ControlLimits,
}

/// Builds limits from a center line and upper/lower control deviations.
///
/// ```text
/// UCL = c + ud        LCL = c − ld
/// UWL = c + ud·2/3    LWL = c − ld·2/3
/// U1s = c + ud·1/3    L1s = c − ld·1/3
/// ```
///
/// # Errors
///
/// [`SpcError::InvalidParameter`] if any input is non-finite or a deviation
/// is negative.
///
/// ```
/// use u_spc::spc::compute_control_limits;
///
/// let l = compute_control_limits(10.0, 3.0, 3.0, 1.0).unwrap();
/// assert!((l.ucl - 13.0).abs() < 1e-12);
/// assert!((l.lwl - 8.0).abs() < 1e-12);
/// assert!((l.u1s - 11.0).abs() < 1e-12);
/// ```
pub fn compute_control_limits(
    center: f64,
    upper_deviation: f64,
    lower_deviation: f64,
    std: f64,
) -> Result<ControlLimits> {
    if !center.is_finite() || !std.is_finite() {
        return Err(SpcError::InvalidParameter(
            "center and std must be finite".into(),
        ));
    }
    for (name, dev) in [("upper", upper_deviation), ("lower", lower_deviation)] {
        if !dev.is_finite() || dev < 0.0 {
            return Err(SpcError::InvalidParameter(format!(
                "{name} deviation must be finite and non-negative, got {dev}"
            )));
        }
    }

    Ok(ControlLimits {
        ucl: center + upper_deviation,
        lcl: center - lower_deviation,
        uwl: center + upper_deviation * (2.0 / 3.0),
        lwl: center - lower_deviation * (2.0 / 3.0),
        u1s: center + upper_deviation * (1.0 / 3.0),
        l1s: center - lower_deviation * (1.0 / 3.0),
        cl: center,
        std,
    })
}

/// Subgroup-mean chart limits from a known process mean and std.
///
/// The control deviation is `3·std/√n`; the warning and one-sigma limits
/// land on `2·std/√n` and `std/√n`.
///
/// # Errors
///
/// [`SpcError::InvalidParameter`] if `subgroup_size` is zero or `std` is
/// negative or non-finite.
pub fn sigma_limits(mean: f64, std: f64, subgroup_size: usize) -> Result<ControlLimits> {
    if subgroup_size == 0 {
        return Err(SpcError::InvalidParameter(
            "subgroup_size must be positive".into(),
        ));
    }
    let deviation = 3.0 * std / (subgroup_size as f64).sqrt();
    compute_control_limits(mean, deviation, deviation, std)
}

/// X-bar and R chart limits from estimated parameters and tabulated factors.
///
/// `params.std` is the average subgroup range (R-bar), see
/// [`estimate_parameters`](super::estimate_parameters).
///
/// - X-bar chart: CL = mean, UCL/LCL = CL ± A2·R-bar
/// - R chart: CL = R-bar, UCL = D4·R-bar, LCL = D3·R-bar
///
/// The R chart is asymmetric because ranges are non-negative and
/// right-skewed: its upper deviation is `(D4 − 1)·R-bar` and its lower
/// deviation `(1 − D3)·R-bar`.
///
/// ```
/// use u_spc::spc::{chart_limits, ChartFactors, ProcessParameters};
///
/// let params = ProcessParameters { mean: 1.5, std: 0.35 };
/// let limits = chart_limits(&params, &ChartFactors::for_subgroup_size(5).unwrap()).unwrap();
/// assert!((limits.xbar.ucl - (1.5 + 0.577 * 0.35)).abs() < 1e-12);
/// assert!((limits.range.ucl - 2.114 * 0.35).abs() < 1e-12);
/// assert!(limits.range.lcl.abs() < 1e-12);
/// ```
pub fn chart_limits(params: &ProcessParameters, factors: &ChartFactors) -> Result<ChartLimits> {
    let r_bar = params.std;
    let xbar_dev = factors.a2 * r_bar;
    let xbar = compute_control_limits(params.mean, xbar_dev, xbar_dev, r_bar)?;
    let range = compute_control_limits(
        r_bar,
        (factors.d4 - 1.0) * r_bar,
        (1.0 - factors.d3) * r_bar,
        r_bar,
    )?;
    Ok(ChartLimits { xbar, range })
}

/// Average run length to detect a one-sigma shift: `ceil(1 / (1 − β))`.
///
/// `beta_risk` is the probability of missing the shift on one sample. It is
/// supplied by the caller rather than derived here.
///
/// # Errors
///
/// [`SpcError::InvalidParameter`] unless `0 <= beta_risk < 1`.
///
/// ```
/// use u_spc::spc::compute_arl;
///
/// assert_eq!(compute_arl(0.0).unwrap(), 1);
/// assert_eq!(compute_arl(0.75).unwrap(), 4);
/// assert!(compute_arl(1.0).is_err());
/// ```
pub fn compute_arl(beta_risk: f64) -> Result<u64> {
    if !(0.0..1.0).contains(&beta_risk) {
        return Err(SpcError::InvalidParameter(format!(
            "beta risk must be in [0, 1), got {beta_risk}"
        )));
    }
    let arl = 1.0 / (1.0 - beta_risk);
    // 1 / (1 - 0.9) is 10.000000000000002; drop the representation error before ceil
    Ok((arl - arl * 1e-12).ceil() as u64)
}
