//! Numeric primitives used by the run rules.
//!
//! - [`ols`]: simple least-squares line fit with R²
//! - [`is_alternating`]: strict up/down alternation test
//! - [`normalized_entropy`]: Shannon entropy of exact values scaled to [0, 1]
//! - [`scale_value`]: linear remap between two ranges
//!
//! # Examples
//!
//! ```
//! use u_spc::stats::ols;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 3.0, 5.0, 7.0];
//! let fit = ols(&x, &y).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!((fit.intercept - 1.0).abs() < 1e-12);
//! assert!((fit.r_squared - 1.0).abs() < 1e-12);
//! ```

use std::collections::HashMap;

use u_numflow::stats;

use crate::error::{Result, SpcError};

/// Result of a least-squares fit y = intercept + slope · x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    /// Slope (β₁).
    pub slope: f64,
    /// Intercept (β₀).
    pub intercept: f64,
    /// Coefficient of determination (squared Pearson correlation).
    pub r_squared: f64,
}

/// Ordinary least squares from sample moments.
///
/// ```text
/// m  = cov(x, y) / var(x)
/// b  = ȳ − m·x̄
/// r² = cov(x, y)² / (var(x)·var(y))
/// ```
///
/// # Returns
///
/// `None` if fewer than 2 points, slices differ in length, any value is
/// non-finite, or `x` has zero variance. A constant `y` yields slope 0 and
/// R² = 1 (a flat line fits exactly).
pub fn ols(x: &[f64], y: &[f64]) -> Option<OlsFit> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let x_mean = stats::mean(x)?;
    let y_mean = stats::mean(y)?;
    let x_var = stats::variance(x)?;
    let y_var = stats::variance(y)?;
    let cov = stats::covariance(x, y)?;

    if x_var < 1e-300 {
        return None; // zero variance in x
    }

    let slope = cov / x_var;
    let intercept = y_mean - slope * x_mean;
    let r_squared = if y_var > 1e-300 {
        (cov * cov / (x_var * y_var)).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(OlsFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Returns `true` if consecutive moves strictly alternate up and down.
///
/// Any two equal adjacent points, or two moves in the same direction,
/// break alternation. Sequences shorter than 2 are trivially alternating.
///
/// ```
/// use u_spc::stats::is_alternating;
///
/// assert!(is_alternating(&[1.0, 3.0, 2.0, 4.0, 3.0]));
/// assert!(!is_alternating(&[1.0, 2.0, 3.0]));
/// assert!(!is_alternating(&[1.0, 1.0]));
/// assert!(is_alternating(&[]));
/// ```
pub fn is_alternating(points: &[f64]) -> bool {
    // +1 = up, -1 = down, 0 = no move yet
    let mut direction = 0_i8;
    for w in points.windows(2) {
        let step = if w[1] > w[0] {
            1
        } else if w[1] < w[0] {
            -1
        } else {
            return false;
        };
        if step == direction {
            return false;
        }
        direction = step;
    }
    true
}

/// Shannon entropy of the empirical distribution of exact values,
/// normalized by log2 of the number of distinct values.
///
/// ```text
/// H(X)  = −Σ p(x) · log2 p(x)
/// H'(X) = H(X) / log2(k),  k = distinct values
/// ```
///
/// Higher values mean a more random-looking sequence. A sequence with a
/// single distinct value is maximally non-random and yields `0.0`.
///
/// # Errors
///
/// [`SpcError::InsufficientData`] for an empty slice.
pub fn normalized_entropy(points: &[f64]) -> Result<f64> {
    if points.is_empty() {
        return Err(SpcError::InsufficientData { needed: 1, got: 0 });
    }

    let mut freq: HashMap<u64, usize> = HashMap::new();
    for &p in points {
        // + 0.0 folds -0.0 into 0.0 so both count as the same value
        *freq.entry((p + 0.0).to_bits()).or_insert(0) += 1;
    }

    let distinct = freq.len();
    if distinct < 2 {
        return Ok(0.0);
    }

    let total = points.len() as f64;
    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    Ok((entropy / (distinct as f64).log2()).clamp(0.0, 1.0))
}

/// Linearly maps `value` from `[src_min, src_max]` to `[dst_min, dst_max]`.
///
/// A degenerate source range (`src_min == src_max`) maps every value to
/// `dst_min`.
pub fn scale_value(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
    let span = src_max - src_min;
    if span == 0.0 {
        return dst_min;
    }
    (value - src_min) / span * (dst_max - dst_min) + dst_min
}
