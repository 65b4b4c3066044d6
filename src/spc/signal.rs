//! Per-rule signal states and the tick-level aggregator.
//!
//! [`evaluate_signals`] turns the trailing stream, the previous tick's
//! [`RuleStateMap`] and the control limits into a fresh map. It is a pure
//! function: identical inputs always yield identical maps.
//!
//! # State rules
//!
//! - no qualifying window: `Ok`, no onset
//! - most recent qualifying window ends on the newest sample: `Alert`
//! - otherwise: `Warning`
//!
//! The onset is the first timestamp of the chosen window, i.e. when the
//! contiguous pattern began.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chart::ControlLimits;
use super::rules::RuleId;
use crate::config::SignalConfig;
use crate::sample::Sample;

/// Severity of one rule on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalState {
    /// Pattern not present in the evaluated window.
    #[default]
    Ok,
    /// Pattern occurred recently but the newest point is clean.
    Warning,
    /// Pattern includes the newest point.
    Alert,
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalState::Ok => write!(f, "OK"),
            SignalState::Warning => write!(f, "WARNING"),
            SignalState::Alert => write!(f, "ALERT"),
        }
    }
}

/// State of one rule and, when active, the timestamp its pattern began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleState {
    pub state: SignalState,
    /// `None` when there is no active occurrence.
    pub onset: Option<i64>,
}

impl RuleState {
    pub const OK: RuleState = RuleState {
        state: SignalState::Ok,
        onset: None,
    };

    pub fn is_active(&self) -> bool {
        self.state != SignalState::Ok
    }
}

/// One [`RuleState`] for every [`RuleId`].
///
/// The default map has every rule `Ok`. Serializes as an object keyed by
/// rule code (`"POC"`, `"2/3-2s"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStateMap(BTreeMap<RuleId, RuleState>);

impl Default for RuleStateMap {
    fn default() -> Self {
        Self(RuleId::ALL.iter().map(|&id| (id, RuleState::OK)).collect())
    }
}

impl RuleStateMap {
    /// State of `rule` (`Ok` if the map somehow lacks it).
    pub fn get(&self, rule: RuleId) -> RuleState {
        self.0.get(&rule).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, RuleState)> + '_ {
        self.0.iter().map(|(&id, &state)| (id, state))
    }

    /// Latest onset across all rules.
    pub fn max_onset(&self) -> Option<i64> {
        self.0.values().filter_map(|s| s.onset).max()
    }

    pub fn is_all_ok(&self) -> bool {
        self.0.values().all(|s| !s.is_active())
    }

    /// Rules currently in `state`.
    pub fn rules_in(&self, state: SignalState) -> Vec<RuleId> {
        self.iter()
            .filter(|(_, s)| s.state == state)
            .map(|(id, _)| id)
            .collect()
    }
}

impl FromIterator<(RuleId, RuleState)> for RuleStateMap {
    /// Rules missing from the iterator default to `Ok`.
    fn from_iter<I: IntoIterator<Item = (RuleId, RuleState)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.0.extend(iter);
        map
    }
}

/// Reduces the qualifying windows of one rule to a [`RuleState`].
///
/// Picks the window whose last sample is newest (the first one wins on a
/// tie). `Alert` if that sample is `latest`, `Warning` otherwise.
pub fn state_from_windows<'a, I>(latest: &Sample, windows: I) -> RuleState
where
    I: IntoIterator<Item = &'a [Sample]>,
{
    let mut chosen: Option<&[Sample]> = None;
    for window in windows {
        let Some(last) = window.last() else { continue };
        let newer = match chosen.and_then(<[Sample]>::last) {
            Some(current) => last.timestamp() > current.timestamp(),
            None => true,
        };
        if newer {
            chosen = Some(window);
        }
    }

    match chosen {
        Some(window) => {
            let ends_now = window
                .last()
                .is_some_and(|s| s.timestamp() == latest.timestamp());
            RuleState {
                state: if ends_now {
                    SignalState::Alert
                } else {
                    SignalState::Warning
                },
                onset: window.first().map(Sample::timestamp),
            }
        }
        None => RuleState::OK,
    }
}

/// Evaluates every rule against the trailing stream.
///
/// Only the last `config.evaluation_window` samples are considered.
///
/// If the previous map has an onset and the newest sample is less than
/// `config.polling_interval_ms` past it, evaluation is skipped and the
/// all-`Ok` map is returned; this keeps one occurrence from re-triggering
/// within a single sampling period.
///
/// # Examples
///
/// ```
/// use u_spc::{Sample, SignalConfig};
/// use u_spc::spc::{evaluate_signals, sigma_limits, RuleId, RuleStateMap, SignalState};
///
/// let limits = sigma_limits(10.0, 1.0, 1).unwrap(); // UCL = 13
/// let stream = vec![
///     Sample::new(1_000, vec![10.2]).unwrap(),
///     Sample::new(2_000, vec![13.5]).unwrap(),
/// ];
/// let config = SignalConfig::default();
/// let map = evaluate_signals(&stream, &RuleStateMap::default(), &limits, &config);
/// let poc = map.get(RuleId::PointOutsideControl);
/// assert_eq!(poc.state, SignalState::Alert);
/// assert_eq!(poc.onset, Some(2_000));
/// ```
pub fn evaluate_signals(
    stream: &[Sample],
    previous: &RuleStateMap,
    limits: &ControlLimits,
    config: &SignalConfig,
) -> RuleStateMap {
    let start = stream.len().saturating_sub(config.evaluation_window);
    let stream = &stream[start..];
    let Some(latest) = stream.last() else {
        return RuleStateMap::default();
    };

    if let Some(onset) = previous.max_onset() {
        let elapsed = latest.timestamp().saturating_sub(onset);
        if elapsed < config.polling_interval_ms {
            debug!(
                latest = latest.timestamp(),
                onset, elapsed, "signal debounce, skipping evaluation"
            );
            return RuleStateMap::default();
        }
    }

    let map: RuleStateMap = RuleId::ALL
        .iter()
        .map(|&rule| {
            let checks = rule.checks(limits, &config.thresholds);
            let state = state_from_windows(latest, checks.iter().filter_map(|c| c.scan(stream)));
            (rule, state)
        })
        .collect();

    debug!(
        latest = latest.timestamp(),
        samples = stream.len(),
        alerts = map.rules_in(SignalState::Alert).len(),
        warnings = map.rules_in(SignalState::Warning).len(),
        "signals evaluated"
    );
    map
}
