//! Process capability ratio (PCR).
//!
//! Sigma is estimated from the average subgroup range as σ̂ = R-bar / d2,
//! so the ratio becomes:
//!
//! ```text
//! PCR = (USL − LSL) / (6 · R-bar / d2)
//! ```
//!
//! There is no statistical relationship between control limits and
//! specification limits; the PCR only compares the tolerance with the
//! natural spread of the process.

use crate::error::{Result, SpcError};

/// Process capability ratio from the average range and the d2 factor.
///
/// # Errors
///
/// [`SpcError::InvalidParameter`] if any input is non-finite, `usl <= lsl`,
/// or `std`/`d2` is not positive.
///
/// # Examples
///
/// ```
/// use u_spc::capability::compute_pcr;
///
/// // R-bar = 0.35, n = 5 (d2 = 2.326)
/// let pcr = compute_pcr(1.0, 2.0, 0.35, 2.326).unwrap();
/// assert!((pcr - 1.0 / (6.0 * 0.35 / 2.326)).abs() < 1e-12);
/// ```
pub fn compute_pcr(lsl: f64, usl: f64, std: f64, d2: f64) -> Result<f64> {
    if [lsl, usl, std, d2].iter().any(|v| !v.is_finite()) {
        return Err(SpcError::InvalidParameter(
            "capability inputs must be finite".into(),
        ));
    }
    if usl <= lsl {
        return Err(SpcError::InvalidParameter(format!(
            "USL ({usl}) must be greater than LSL ({lsl})"
        )));
    }
    if std <= 0.0 || d2 <= 0.0 {
        return Err(SpcError::InvalidParameter(
            "std and d2 must be positive".into(),
        ));
    }
    Ok((usl - lsl) / (6.0 * (std / d2)))
}

/// Percentage of a unit specification width taken up by the process spread,
/// `100 / PCR(0, 1)`.
///
/// Values above 100 mean the natural spread is wider than the tolerance.
pub fn spec_width_usage(std: f64, d2: f64) -> Result<f64> {
    Ok(100.0 / compute_pcr(0.0, 1.0, std, d2)?)
}
