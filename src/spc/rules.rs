//! Sliding-window run rules for detecting non-random patterns.
//!
//! Every evaluator scans the trailing stream from the newest sample
//! backwards and returns the most recent contiguous window of a fixed size
//! that satisfies its predicate, oldest sample first. Streams shorter than
//! the window never qualify: missing data means no signal.
//!
//! | Rule | Window | Threshold | Predicate |
//! |------|--------|-----------|-----------|
//! | POC | 1 | 1 | mean > UCL or mean < LCL |
//! | 2/3-2s | 3 | 2 | UWL < mean <= UCL, or LCL <= mean < LWL, same side |
//! | 4/5-1s | 5 | 4 | mean beyond the one-sigma line, same side |
//! | 8OS | 8 | 8 | all above, or all below, the center line |
//! | 6Trend | 6 | - | scaled OLS fit with high R² and steep slope |
//! | 15C | 15 | 15 | all within zone C |
//! | 14Alt | 14 | - | means alternate up and down |
//! | 8BS | 8 | 8 | none within zone C |
//! | NR | 10 | - | normalized entropy of means below threshold |
//! | PNL | 1 | 1 | mean near UCL, LCL, UWL or LWL |
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart: Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chart::ControlLimits;
use crate::config::RuleThresholds;
use crate::sample::Sample;
use crate::stats::{is_alternating, normalized_entropy, ols, scale_value};

/// The fixed set of rules evaluated on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    /// One or more points outside the control limits.
    #[serde(rename = "POC")]
    PointOutsideControl,
    /// Two of three consecutive points in the warning zone on one side.
    #[serde(rename = "2/3-2s")]
    TwoOfThreeBeyond2Sigma,
    /// Four of five consecutive points beyond one sigma on one side.
    #[serde(rename = "4/5-1s")]
    FourOfFiveBeyond1Sigma,
    /// Eight consecutive points on one side of the center line.
    #[serde(rename = "8OS")]
    EightOneSide,
    /// Six points in a row steadily increasing or decreasing.
    #[serde(rename = "6Trend")]
    SixTrend,
    /// Fifteen points in a row in zone C.
    #[serde(rename = "15C")]
    FifteenInZoneC,
    /// Fourteen points in a row alternating up and down.
    #[serde(rename = "14Alt")]
    FourteenAlternating,
    /// Eight points in a row on both sides with none in zone C.
    #[serde(rename = "8BS")]
    EightBothSides,
    /// A non-random pattern in the data.
    #[serde(rename = "NR")]
    NonRandom,
    /// One or more points near a warning or control limit.
    #[serde(rename = "PNL")]
    PointNearLimit,
}

impl RuleId {
    /// Every rule, in display order.
    pub const ALL: [RuleId; 10] = [
        RuleId::PointOutsideControl,
        RuleId::TwoOfThreeBeyond2Sigma,
        RuleId::FourOfFiveBeyond1Sigma,
        RuleId::EightOneSide,
        RuleId::SixTrend,
        RuleId::FifteenInZoneC,
        RuleId::FourteenAlternating,
        RuleId::EightBothSides,
        RuleId::NonRandom,
        RuleId::PointNearLimit,
    ];

    /// Short label shown on dashboards.
    pub fn code(self) -> &'static str {
        match self {
            RuleId::PointOutsideControl => "POC",
            RuleId::TwoOfThreeBeyond2Sigma => "2/3-2s",
            RuleId::FourOfFiveBeyond1Sigma => "4/5-1s",
            RuleId::EightOneSide => "8OS",
            RuleId::SixTrend => "6Trend",
            RuleId::FifteenInZoneC => "15C",
            RuleId::FourteenAlternating => "14Alt",
            RuleId::EightBothSides => "8BS",
            RuleId::NonRandom => "NR",
            RuleId::PointNearLimit => "PNL",
        }
    }

    /// One-sentence explanation of the pattern.
    pub fn description(self) -> &'static str {
        match self {
            RuleId::PointOutsideControl => "One or more points outside the control limits.",
            RuleId::TwoOfThreeBeyond2Sigma => {
                "Two of three consecutive points outside the two-sigma warning limits \
                 but still inside the control limits."
            }
            RuleId::FourOfFiveBeyond1Sigma => {
                "Four of five consecutive points beyond the one-sigma limits."
            }
            RuleId::EightOneSide => {
                "A run of eight consecutive points on one side of the center line."
            }
            RuleId::SixTrend => "Six points in a row steadily increasing or decreasing.",
            RuleId::FifteenInZoneC => {
                "Fifteen points in a row in zone C (both above and below the center line)."
            }
            RuleId::FourteenAlternating => "Fourteen points in a row alternating up and down.",
            RuleId::EightBothSides => {
                "Eight points in a row on both sides of the center line with none in zone C."
            }
            RuleId::NonRandom => "An unusual or nonrandom pattern in the data.",
            RuleId::PointNearLimit => "One or more points near a warning or control limit.",
        }
    }

    /// The sub-checks making up this rule for the given limits.
    ///
    /// A rule fires when any of its sub-checks finds a qualifying window.
    pub fn checks(self, limits: &ControlLimits, thresholds: &RuleThresholds) -> Vec<WindowCheck> {
        use LimitCriterion as C;

        let limit = |window, threshold, criterion| WindowCheck::Limit {
            window,
            threshold,
            criterion,
        };

        match self {
            RuleId::PointOutsideControl => vec![
                limit(1, 1, C::above(limits.ucl)),
                limit(1, 1, C::below(limits.lcl)),
            ],
            RuleId::TwoOfThreeBeyond2Sigma => vec![
                limit(3, 2, C::zone(limits.uwl, limits.ucl, Side::Above)),
                limit(3, 2, C::zone(limits.lwl, limits.lcl, Side::Below)),
            ],
            RuleId::FourOfFiveBeyond1Sigma => vec![
                limit(5, 4, C::above(limits.u1s)),
                limit(5, 4, C::below(limits.l1s)),
            ],
            RuleId::EightOneSide => vec![
                limit(8, 8, C::above(limits.cl)),
                limit(8, 8, C::below(limits.cl)),
            ],
            RuleId::SixTrend => [Trend::Rising, Trend::Falling]
                .into_iter()
                .map(|direction| WindowCheck::Trend {
                    window: 6,
                    direction,
                    min_r_squared: thresholds.trend_r_squared,
                    min_slope: thresholds.trend_slope,
                })
                .collect(),
            RuleId::FifteenInZoneC => vec![limit(15, 15, C::inside(limits.l1s, limits.u1s))],
            RuleId::FourteenAlternating => vec![WindowCheck::Alternating { window: 14 }],
            RuleId::EightBothSides => vec![limit(8, 8, C::outside(limits.l1s, limits.u1s))],
            RuleId::NonRandom => vec![WindowCheck::NonRandom {
                window: 10,
                max_entropy: thresholds.entropy,
            }],
            RuleId::PointNearLimit => [limits.ucl, limits.lcl, limits.uwl, limits.lwl]
                .into_iter()
                .map(|l| {
                    let half_width = l.abs() * thresholds.near_limit_tolerance;
                    limit(1, 1, C::inside(l - half_width, l + half_width))
                })
                .collect(),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which side of a limit a point must fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Predicate on a single subgroup mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitCriterion {
    /// Strictly above or below a single limit.
    Beyond { limit: f64, side: Side },
    /// Inside (or outside) the closed band `[lo, hi]`.
    Band { lo: f64, hi: f64, inside: bool },
    /// Strictly beyond `inner` on `side` but not beyond `outer`: the
    /// half-open interval `(inner, outer]` above, `[outer, inner)` below.
    Zone { inner: f64, outer: f64, side: Side },
}

impl LimitCriterion {
    pub fn above(limit: f64) -> Self {
        LimitCriterion::Beyond {
            limit,
            side: Side::Above,
        }
    }

    pub fn below(limit: f64) -> Self {
        LimitCriterion::Beyond {
            limit,
            side: Side::Below,
        }
    }

    pub fn inside(lo: f64, hi: f64) -> Self {
        LimitCriterion::Band {
            lo,
            hi,
            inside: true,
        }
    }

    pub fn outside(lo: f64, hi: f64) -> Self {
        LimitCriterion::Band {
            lo,
            hi,
            inside: false,
        }
    }

    pub fn zone(inner: f64, outer: f64, side: Side) -> Self {
        LimitCriterion::Zone { inner, outer, side }
    }

    pub fn matches(&self, value: f64) -> bool {
        match *self {
            LimitCriterion::Beyond { limit, side } => match side {
                Side::Above => value > limit,
                Side::Below => value < limit,
            },
            LimitCriterion::Band { lo, hi, inside } => {
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                (lo..=hi).contains(&value) == inside
            }
            LimitCriterion::Zone { inner, outer, side } => match side {
                Side::Above => value > inner && value <= outer,
                Side::Below => value < inner && value >= outer,
            },
        }
    }
}

/// Direction of a trend sub-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
}

/// One windowed sub-check of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCheck {
    /// At least `threshold` of `window` means satisfy `criterion`.
    Limit {
        window: usize,
        threshold: usize,
        criterion: LimitCriterion,
    },
    /// Scaled least-squares trend in the given direction.
    Trend {
        window: usize,
        direction: Trend,
        min_r_squared: f64,
        min_slope: f64,
    },
    /// Means alternate up and down.
    Alternating { window: usize },
    /// Normalized entropy of means below `max_entropy`.
    NonRandom { window: usize, max_entropy: f64 },
}

impl WindowCheck {
    pub fn window(&self) -> usize {
        match *self {
            WindowCheck::Limit { window, .. }
            | WindowCheck::Trend { window, .. }
            | WindowCheck::Alternating { window }
            | WindowCheck::NonRandom { window, .. } => window,
        }
    }

    /// Most recent qualifying window in `stream`, if any.
    pub fn scan<'a>(&self, stream: &'a [Sample]) -> Option<&'a [Sample]> {
        match *self {
            WindowCheck::Limit {
                window,
                threshold,
                criterion,
            } => points_in_limit(stream, window, Some(threshold), criterion),
            WindowCheck::Trend {
                window,
                direction,
                min_r_squared,
                min_slope,
            } => points_with_trend(stream, window, direction, min_r_squared, min_slope),
            WindowCheck::Alternating { window } => alternating_points(stream, window),
            WindowCheck::NonRandom {
                window,
                max_entropy,
            } => non_random_points(stream, window, max_entropy),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluators
// ---------------------------------------------------------------------------

/// Shortest-lookback-first search: the window ending at the newest sample
/// is tried first, then each one a step further back, down to the oldest.
fn most_recent_window<F>(stream: &[Sample], window: usize, mut qualifies: F) -> Option<&[Sample]>
where
    F: FnMut(&[Sample]) -> bool,
{
    if window == 0 || stream.len() < window {
        return None;
    }
    (0..=stream.len() - window)
        .rev()
        .map(|start| &stream[start..start + window])
        .find(|&w| qualifies(w))
}

fn means(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(Sample::mean).collect()
}

/// Most recent window of `window` samples where at least `threshold`
/// means satisfy `criterion`. `threshold` defaults to `window`.
pub fn points_in_limit(
    stream: &[Sample],
    window: usize,
    threshold: Option<usize>,
    criterion: LimitCriterion,
) -> Option<&[Sample]> {
    let threshold = threshold.unwrap_or(window);
    most_recent_window(stream, window, |w| {
        w.iter().filter(|s| criterion.matches(s.mean())).count() >= threshold
    })
}

/// Most recent window whose means form a linear trend.
///
/// Means are rescaled into the index range `[0, window − 1]` before the
/// fit so that `min_slope` does not depend on the chart's units; a slope
/// of 1 is then a 45° line. A window qualifies when R² > `min_r_squared`
/// and the slope exceeds `min_slope` in the requested direction. A flat
/// window is never a trend.
pub fn points_with_trend(
    stream: &[Sample],
    window: usize,
    direction: Trend,
    min_r_squared: f64,
    min_slope: f64,
) -> Option<&[Sample]> {
    most_recent_window(stream, window, |w| {
        let y = means(w);
        let (y_min, y_max) = y
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if y_max <= y_min {
            return false;
        }
        let top = (window - 1) as f64;
        let x: Vec<f64> = (0..window).map(|i| i as f64).collect();
        let y: Vec<f64> = y
            .into_iter()
            .map(|v| scale_value(v, y_min, y_max, 0.0, top))
            .collect();
        match ols(&x, &y) {
            Some(fit) if fit.r_squared > min_r_squared => match direction {
                Trend::Rising => fit.slope > min_slope,
                Trend::Falling => fit.slope < -min_slope,
            },
            _ => false,
        }
    })
}

/// Most recent window whose means alternate up and down.
pub fn alternating_points(stream: &[Sample], window: usize) -> Option<&[Sample]> {
    most_recent_window(stream, window, |w| is_alternating(&means(w)))
}

/// Most recent window whose means have normalized entropy below `max_entropy`.
pub fn non_random_points(stream: &[Sample], window: usize, max_entropy: f64) -> Option<&[Sample]> {
    most_recent_window(stream, window, |w| {
        normalized_entropy(&means(w)).is_ok_and(|h| h < max_entropy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::chart::compute_control_limits;

    /// Helper: one single-value subgroup per mean, timestamps 0, 1, 2, ...
    fn make_stream(means: &[f64]) -> Vec<Sample> {
        means
            .iter()
            .enumerate()
            .map(|(i, &m)| Sample::new(i as i64, vec![m]).unwrap())
            .collect()
    }

    fn timestamps(window: Option<&[Sample]>) -> Vec<i64> {
        window
            .map(|w| w.iter().map(Sample::timestamp).collect())
            .unwrap_or_default()
    }

    /// CL = 25, sigma = 1: UCL 28, UWL 27, U1s 26.
    fn limits() -> ControlLimits {
        compute_control_limits(25.0, 3.0, 3.0, 1.0).unwrap()
    }

    fn scan(rule: RuleId, stream: &[Sample]) -> Vec<Vec<i64>> {
        rule.checks(&limits(), &RuleThresholds::default())
            .iter()
            .map(|c| timestamps(c.scan(stream)))
            .collect()
    }

    // --- search strategy ---

    #[test]
    fn test_prefers_most_recent_window() {
        let stream = make_stream(&[29.0, 25.0, 29.0, 25.0]);
        let crit = LimitCriterion::above(28.0);
        assert_eq!(timestamps(points_in_limit(&stream, 1, None, crit)), vec![2]);
    }

    #[test]
    fn test_oldest_window_is_examined() {
        let stream = make_stream(&[29.0, 25.0, 25.0]);
        let crit = LimitCriterion::above(28.0);
        assert_eq!(timestamps(points_in_limit(&stream, 1, None, crit)), vec![0]);
    }

    #[test]
    fn test_short_stream_never_qualifies() {
        let stream = make_stream(&[26.0; 7]);
        for check in RuleId::EightOneSide.checks(&limits(), &RuleThresholds::default()) {
            assert!(check.scan(&stream).is_none());
        }
        assert!(alternating_points(&stream, 14).is_none());
        let outside = LimitCriterion::outside(0.0, 1.0);
        assert!(points_in_limit(&[], 1, None, outside).is_none());
    }

    #[test]
    fn test_band_bounds_are_inclusive_and_order_free() {
        let band = LimitCriterion::inside(2.0, 1.0);
        assert!(band.matches(1.0));
        assert!(band.matches(2.0));
        assert!(!band.matches(2.5));
        let outside = LimitCriterion::outside(1.0, 2.0);
        assert!(outside.matches(0.5));
        assert!(!outside.matches(1.5));
    }

    // --- POC ---

    #[test]
    fn test_poc_above_and_below() {
        let hits = scan(
            RuleId::PointOutsideControl,
            &make_stream(&[25.0, 21.5, 25.0, 28.5]),
        );
        assert_eq!(hits, vec![vec![3], vec![1]]);
    }

    #[test]
    fn test_poc_on_limit_is_not_violation() {
        let hits = scan(RuleId::PointOutsideControl, &make_stream(&[28.0, 22.0]));
        assert!(hits.iter().all(Vec::is_empty));
    }

    // --- 2/3-2s ---

    #[test]
    fn test_two_of_three_above() {
        let hits = scan(
            RuleId::TwoOfThreeBeyond2Sigma,
            &make_stream(&[27.5, 25.0, 27.5]),
        );
        assert_eq!(hits[0], vec![0, 1, 2]);
        assert!(hits[1].is_empty());
    }

    #[test]
    fn test_zone_is_open_at_warning_limit_and_closed_at_control_limit() {
        let upper = LimitCriterion::zone(27.0, 28.0, Side::Above);
        assert!(!upper.matches(27.0));
        assert!(upper.matches(27.01));
        assert!(upper.matches(28.0));
        assert!(!upper.matches(28.01));

        let lower = LimitCriterion::zone(23.0, 22.0, Side::Below);
        assert!(!lower.matches(23.0));
        assert!(lower.matches(22.0));
        assert!(!lower.matches(21.99));
    }

    #[test]
    fn test_two_of_three_points_on_warning_limit_do_not_count() {
        let two_of_three = |means: &[f64]| {
            let stream = make_stream(means);
            scan(RuleId::TwoOfThreeBeyond2Sigma, &stream)
        };

        assert!(two_of_three(&[27.0, 25.0, 27.0]).iter().all(Vec::is_empty));
        assert!(two_of_three(&[23.0, 23.0, 25.0]).iter().all(Vec::is_empty));
        assert!(two_of_three(&[28.0, 25.0, 27.0]).iter().all(Vec::is_empty));
        // a mean on UCL is still in the warning zone
        assert_eq!(two_of_three(&[28.0, 25.0, 27.5])[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_two_of_three_ignores_points_beyond_control() {
        // Points beyond UCL belong to POC, not to the warning zone
        let hits = scan(
            RuleId::TwoOfThreeBeyond2Sigma,
            &make_stream(&[28.5, 25.0, 27.5]),
        );
        assert!(hits.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_two_of_three_mixed_sides_not_triggered() {
        let hits = scan(
            RuleId::TwoOfThreeBeyond2Sigma,
            &make_stream(&[27.5, 25.0, 22.5]),
        );
        assert!(hits.iter().all(Vec::is_empty));
    }

    // --- 4/5-1s ---

    #[test]
    fn test_four_of_five_below() {
        let hits = scan(
            RuleId::FourOfFiveBeyond1Sigma,
            &make_stream(&[23.5, 23.5, 25.0, 23.5, 23.5]),
        );
        assert!(hits[0].is_empty());
        assert_eq!(hits[1], vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_three_of_five_not_enough() {
        let hits = scan(
            RuleId::FourOfFiveBeyond1Sigma,
            &make_stream(&[26.5, 25.0, 26.5, 25.0, 26.5]),
        );
        assert!(hits.iter().all(Vec::is_empty));
    }

    // --- 8OS ---

    #[test]
    fn test_eight_one_side() {
        let mut means = vec![24.0];
        means.extend([25.5; 8]);
        let hits = scan(RuleId::EightOneSide, &make_stream(&means));
        assert_eq!(hits[0], (1..=8).collect::<Vec<i64>>());
        assert!(hits[1].is_empty());
    }

    #[test]
    fn test_point_on_center_breaks_run() {
        let mut means = vec![25.5; 8];
        means[4] = 25.0;
        let hits = scan(RuleId::EightOneSide, &make_stream(&means));
        assert!(hits.iter().all(Vec::is_empty));
    }

    // --- 6Trend ---

    #[test]
    fn test_six_falling() {
        let stream = make_stream(&[26.0, 25.8, 25.6, 25.4, 25.2, 25.0]);
        let hits = scan(RuleId::SixTrend, &stream);
        assert!(hits[0].is_empty());
        assert_eq!(hits[1], vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_six_rising_with_noise() {
        let stream = make_stream(&[24.0, 24.6, 24.4, 25.1, 25.5, 25.4]);
        let hits = scan(RuleId::SixTrend, &stream);
        assert_eq!(hits[0], vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flat_and_five_points_not_trend() {
        let flat = make_stream(&[25.0; 10]);
        assert!(scan(RuleId::SixTrend, &flat).iter().all(Vec::is_empty));
        let five = make_stream(&[20.0, 21.0, 22.0, 23.0, 24.0]);
        assert!(scan(RuleId::SixTrend, &five).iter().all(Vec::is_empty));
    }

    #[test]
    fn test_trend_threshold_is_tunable() {
        let stream = make_stream(&[24.0, 24.6, 24.4, 25.1, 25.5, 25.4]);
        let strict = RuleThresholds {
            trend_r_squared: 0.99,
            ..RuleThresholds::default()
        };
        let hits: Vec<_> = RuleId::SixTrend
            .checks(&limits(), &strict)
            .iter()
            .filter_map(|c| c.scan(&stream))
            .collect();
        assert!(hits.is_empty());
    }

    fn scan_with(rule: RuleId, thresholds: &RuleThresholds, stream: &[Sample]) -> usize {
        rule.checks(&limits(), thresholds)
            .iter()
            .filter_map(|c| c.scan(stream))
            .count()
    }

    #[test]
    fn test_trend_slope_is_tunable() {
        // scaled slope of this window is about 0.99
        let stream = make_stream(&[24.0, 24.6, 24.4, 25.1, 25.5, 25.4]);
        let defaults = RuleThresholds::default();
        assert_eq!(scan_with(RuleId::SixTrend, &defaults, &stream), 1);
        let steep = RuleThresholds {
            trend_slope: 1.2,
            ..RuleThresholds::default()
        };
        assert_eq!(scan_with(RuleId::SixTrend, &steep, &stream), 0);
    }

    #[test]
    fn test_entropy_threshold_is_tunable() {
        // p = [0.9, 0.1] => H' = 0.469
        let mut means = vec![25.2; 9];
        means.push(24.8);
        let stream = make_stream(&means);
        let defaults = RuleThresholds::default();
        assert_eq!(scan_with(RuleId::NonRandom, &defaults, &stream), 1);
        let lenient = RuleThresholds {
            entropy: 0.4,
            ..RuleThresholds::default()
        };
        assert_eq!(scan_with(RuleId::NonRandom, &lenient, &stream), 0);
    }

    #[test]
    fn test_near_limit_tolerance_is_tunable() {
        // 0.3 from UWL (27): inside 2% (0.54), outside 1% (0.27)
        let stream = make_stream(&[27.3]);
        let rule = RuleId::PointNearLimit;
        assert_eq!(scan_with(rule, &RuleThresholds::default(), &stream), 1);
        let tight = RuleThresholds {
            near_limit_tolerance: 0.01,
            ..RuleThresholds::default()
        };
        assert_eq!(scan_with(rule, &tight, &stream), 0);
    }

    // --- 15C ---

    #[test]
    fn test_fifteen_in_zone_c() {
        let means: Vec<f64> = (0..15).map(|i| 24.5 + f64::from(i % 3) * 0.25).collect();
        let hits = scan(RuleId::FifteenInZoneC, &make_stream(&means));
        assert_eq!(hits[0].len(), 15);

        let hits = scan(RuleId::FifteenInZoneC, &make_stream(&means[..14]));
        assert!(hits[0].is_empty());
    }

    // --- 14Alt ---

    #[test]
    fn test_fourteen_alternating() {
        let means: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 24.0 } else { 26.0 }).collect();
        let hits = scan(RuleId::FourteenAlternating, &make_stream(&means));
        assert_eq!(hits[0].len(), 14);

        let hits = scan(RuleId::FourteenAlternating, &make_stream(&means[..13]));
        assert!(hits[0].is_empty());
    }

    // --- 8BS ---

    #[test]
    fn test_eight_both_sides() {
        let stream = make_stream(&[27.0, 23.0, 27.0, 23.0, 27.0, 23.0, 27.0, 23.0]);
        assert_eq!(scan(RuleId::EightBothSides, &stream)[0].len(), 8);
        assert!(scan(RuleId::EightBothSides, &stream[..7])[0].is_empty());
    }

    // --- NR ---

    #[test]
    fn test_non_random_repeated_values() {
        let mut means = vec![25.2; 9];
        means.push(24.8);
        let hits = scan(RuleId::NonRandom, &make_stream(&means));
        assert_eq!(hits[0].len(), 10);
    }

    #[test]
    fn test_distinct_values_are_random() {
        let means: Vec<f64> = (0..10).map(|i| 24.0 + f64::from(i) * 0.17).collect();
        let hits = scan(RuleId::NonRandom, &make_stream(&means));
        assert!(hits[0].is_empty());
    }

    // --- PNL ---

    #[test]
    fn test_point_near_limits() {
        // 2% of UWL (27) = 0.54; 2% of LCL (22) = 0.44
        let hits = scan(
            RuleId::PointNearLimit,
            &make_stream(&[27.3, 25.0, 21.7, 25.0]),
        );
        assert!(hits[0].is_empty());
        assert_eq!(hits[1], vec![2]);
        assert_eq!(hits[2], vec![0]);
        assert!(hits[3].is_empty());
    }

    #[test]
    fn test_point_far_from_limits() {
        let hits = scan(RuleId::PointNearLimit, &make_stream(&[25.0, 25.5, 24.4]));
        assert!(hits.iter().all(Vec::is_empty));
    }

    // --- RuleId ---

    #[test]
    fn test_rule_codes_and_windows() {
        assert_eq!(RuleId::ALL.len(), 10);
        assert_eq!(RuleId::TwoOfThreeBeyond2Sigma.to_string(), "2/3-2s");
        let defaults = RuleThresholds::default();
        let windows: Vec<usize> = RuleId::ALL
            .iter()
            .map(|r| r.checks(&limits(), &defaults)[0].window())
            .collect();
        assert_eq!(windows, vec![1, 3, 5, 8, 6, 15, 14, 8, 10, 1]);
        assert!(RuleId::ALL.iter().all(|r| !r.description().is_empty()));
    }
}
