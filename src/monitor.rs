//! Caller-side monitor.
//!
//! [`SignalMonitor`] owns the sample buffer, bootstraps trial limits from the
//! first `preliminary_size` samples and re-evaluates the rules on every
//! ingested sample. It has no timer of its own: the caller decides when
//! samples arrive.
//!
//! ```
//! use u_spc::{Sample, SignalConfig, SignalMonitor};
//! use u_spc::spc::{RuleId, SignalState};
//!
//! let config = SignalConfig::default().with_preliminary_size(4);
//! let mut monitor = SignalMonitor::new(config, 2).unwrap();
//!
//! let data = [[9.8, 10.2], [10.1, 9.9], [10.3, 9.7], [9.9, 10.1]];
//! for (i, values) in data.iter().enumerate() {
//!     monitor.ingest(Sample::new(i as i64 * 1_000, values.to_vec()).unwrap()).unwrap();
//! }
//! assert!(monitor.limits().is_some());
//!
//! let signals = monitor.ingest(Sample::new(10_000, vec![14.0, 14.2]).unwrap()).unwrap();
//! assert_eq!(signals.get(RuleId::PointOutsideControl).state, SignalState::Alert);
//! ```

use tracing::{debug, info, warn};

use crate::config::SignalConfig;
use crate::error::{Result, SpcError};
use crate::sample::{Sample, SampleStream};
use crate::spc::{
    chart_limits, estimate_parameters, evaluate_signals, ChartFactors, ChartLimits, ControlLimits,
    RuleStateMap,
};

/// Rolling monitor over one process characteristic.
#[derive(Debug, Clone)]
pub struct SignalMonitor {
    config: SignalConfig,
    subgroup_size: usize,
    stream: SampleStream,
    limits: Option<ChartLimits>,
    signals: RuleStateMap,
}

impl SignalMonitor {
    /// Creates a monitor whose limits will be estimated from the first
    /// `config.preliminary_size` samples.
    ///
    /// `subgroup_size` selects the chart factors used at bootstrap; it is
    /// only checked against the factor table when limits are estimated.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidParameter`] if the configuration does not validate.
    pub fn new(config: SignalConfig, subgroup_size: usize) -> Result<Self> {
        config.validate()?;
        let stream = SampleStream::with_capacity(config.history_capacity)?;
        Ok(Self {
            config,
            subgroup_size,
            stream,
            limits: None,
            signals: RuleStateMap::default(),
        })
    }

    /// Uses known limits instead of estimating them from preliminary data.
    pub fn with_limits(mut self, limits: ChartLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Appends `sample` and returns the signal map for this tick.
    ///
    /// Until limits exist the map stays all-OK. When the buffer first holds
    /// `preliminary_size` samples the limits are estimated and the rules
    /// run on the same tick.
    ///
    /// # Errors
    ///
    /// - [`SpcError::NonMonotonicTimestamp`] if `sample` is older than the
    ///   newest retained sample. Nothing changes in that case.
    /// - [`SpcError::UnsupportedSubgroupSize`] if bootstrap needs factors for
    ///   a subgroup size outside the table.
    pub fn ingest(&mut self, sample: Sample) -> Result<&RuleStateMap> {
        let timestamp = sample.timestamp();
        if let Err(e) = self.stream.push(sample) {
            warn!(timestamp, error = %e, "sample rejected");
            return Err(e);
        }

        if self.limits.is_none() {
            if self.stream.len() < self.config.preliminary_size {
                debug!(
                    collected = self.stream.len(),
                    needed = self.config.preliminary_size,
                    "collecting preliminary samples"
                );
                return Ok(&self.signals);
            }
            self.estimate_limits()?;
        }

        if let Some(limits) = &self.limits {
            let window = self.stream.contiguous_tail(self.config.evaluation_window);
            self.signals = evaluate_signals(window, &self.signals, &limits.xbar, &self.config);
        }
        Ok(&self.signals)
    }

    /// Recomputes the limits from the newest `preliminary_size` samples.
    ///
    /// # Errors
    ///
    /// [`SpcError::InsufficientData`] if fewer samples are buffered, or
    /// [`SpcError::UnsupportedSubgroupSize`] for an unknown subgroup size.
    pub fn reestimate(&mut self) -> Result<&ChartLimits> {
        if self.stream.len() < self.config.preliminary_size {
            return Err(SpcError::InsufficientData {
                needed: self.config.preliminary_size,
                got: self.stream.len(),
            });
        }
        self.estimate_limits()
    }

    /// Returns every rule to `Ok` without touching the buffer or limits.
    pub fn reset_signals(&mut self) {
        self.signals = RuleStateMap::default();
    }

    /// Limits of the subgroup-mean chart, the ones the rules run against.
    pub fn limits(&self) -> Option<&ControlLimits> {
        self.limits.as_ref().map(|l| &l.xbar)
    }

    pub fn chart_limits(&self) -> Option<&ChartLimits> {
        self.limits.as_ref()
    }

    /// Signal map of the most recent tick.
    pub fn signals(&self) -> &RuleStateMap {
        &self.signals
    }

    pub fn stream(&self) -> &SampleStream {
        &self.stream
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    fn estimate_limits(&mut self) -> Result<&ChartLimits> {
        let factors = ChartFactors::for_subgroup_size(self.subgroup_size)?;
        let preliminary = self.stream.contiguous_tail(self.config.preliminary_size);
        let params = estimate_parameters(preliminary)?;
        let limits = chart_limits(&params, &factors)?;
        info!(
            mean = params.mean,
            r_bar = params.std,
            ucl = limits.xbar.ucl,
            lcl = limits.xbar.lcl,
            "control limits established"
        );
        Ok(self.limits.insert(limits))
    }
}
