//! Subgroup samples and the bounded stream buffer that holds them.
//!
//! A [`Sample`] is one timestamped subgroup of measurements. All derived
//! statistics (mean, standard deviation, min, max, range) are pure functions
//! of the stored values, which never change after construction.
//!
//! [`SampleStream`] is the owned buffer the caller appends to. The signal
//! engine only ever reads a trailing window of it via
//! [`SampleStream::contiguous_tail`].

use std::collections::{vec_deque, VecDeque};

use serde::Serialize;
use u_numflow::stats;

use crate::error::{Result, SpcError};

/// One grouped measurement (subgroup) taken at a point in time.
///
/// # Invariants
///
/// - `values` is non-empty
/// - every value is finite
///
/// # Examples
///
/// ```
/// use u_spc::Sample;
///
/// let s = Sample::new(1_000, vec![1.4, 1.5, 1.6]).unwrap();
/// assert!((s.mean() - 1.5).abs() < 1e-12);
/// assert!((s.range() - 0.2).abs() < 1e-12);
/// assert!(Sample::new(1_000, vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    timestamp: i64,
    values: Vec<f64>,
    #[serde(skip)]
    mean: f64,
    #[serde(skip)]
    min: f64,
    #[serde(skip)]
    max: f64,
}

impl Sample {
    /// Creates a sample, rejecting empty subgroups and non-finite values.
    ///
    /// Mean, min and max are computed once here.
    pub fn new(timestamp: i64, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SpcError::EmptySample);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SpcError::NonFiniteValue { index, value });
        }
        let mean = stats::mean(&values).ok_or(SpcError::EmptySample)?;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Ok(Self {
            timestamp,
            values,
            mean,
            min,
            max,
        })
    }

    /// Timestamp of the subgroup (epoch milliseconds by convention).
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The raw measurements.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Subgroup size n.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Arithmetic mean of the subgroup.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (n − 1 denominator).
    ///
    /// # Errors
    ///
    /// [`SpcError::InsufficientData`] for a subgroup of size 1, where the
    /// estimator is undefined.
    pub fn std(&self) -> Result<f64> {
        let insufficient = SpcError::InsufficientData {
            needed: 2,
            got: self.values.len(),
        };
        if self.values.len() < 2 {
            return Err(insufficient);
        }
        stats::std_dev(&self.values).ok_or(insufficient)
    }

    /// Smallest measurement.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest measurement.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Range R = max − min.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Owned, bounded, chronologically ordered buffer of samples.
///
/// Appends must carry non-decreasing timestamps; equal timestamps are
/// accepted. Once `capacity` is reached the oldest sample is dropped.
#[derive(Debug, Clone)]
pub struct SampleStream {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleStream {
    /// Creates an empty stream retaining at most `capacity` samples.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidParameter`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SpcError::InvalidParameter(
                "stream capacity must be positive".into(),
            ));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Appends a sample, evicting the oldest one when full.
    ///
    /// # Errors
    ///
    /// [`SpcError::NonMonotonicTimestamp`] if the sample is older than the
    /// current newest sample. The stream is left unchanged.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if let Some(last) = self.samples.back() {
            if sample.timestamp < last.timestamp {
                return Err(SpcError::NonMonotonicTimestamp {
                    previous: last.timestamp,
                    current: sample.timestamp,
                });
            }
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        Ok(())
    }

    /// The most recent `n` samples (fewer if the stream is shorter), oldest first.
    pub fn tail(&self, n: usize) -> vec_deque::Iter<'_, Sample> {
        let start = self.samples.len().saturating_sub(n);
        self.samples.range(start..)
    }

    /// Same window as [`tail`](Self::tail) as one slice, for the rule
    /// evaluators. Rotates the ring buffer into place if it has wrapped.
    pub fn contiguous_tail(&mut self, n: usize) -> &[Sample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples.make_contiguous()[start..]
    }

    /// Every retained sample, oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// The newest sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every retained sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: i64, values: &[f64]) -> Sample {
        Sample::new(ts, values.to_vec()).expect("valid sample")
    }

    #[test]
    fn test_derived_statistics() {
        let s = sample(1, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.mean() - 5.0).abs() < 1e-12);
        // Sum of squares = 32, n - 1 = 7
        assert!((s.std().unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!((s.min() - 2.0).abs() < f64::EPSILON);
        assert!((s.max() - 9.0).abs() < f64::EPSILON);
        assert!((s.range() - 7.0).abs() < f64::EPSILON);
        assert_eq!(s.size(), 8);
    }

    #[test]
    fn test_std_of_single_value_is_insufficient() {
        let s = sample(1, &[3.0]);
        assert!(matches!(
            s.std(),
            Err(SpcError::InsufficientData { needed: 2, got: 1 })
        ));
        assert!((s.range()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(matches!(Sample::new(0, vec![]), Err(SpcError::EmptySample)));
        assert!(matches!(
            Sample::new(0, vec![1.0, f64::NAN]),
            Err(SpcError::NonFiniteValue { index: 1, .. })
        ));
        assert!(Sample::new(0, vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_stream_evicts_oldest() {
        let mut stream = SampleStream::with_capacity(3).unwrap();
        for ts in 0..5 {
            stream.push(sample(ts, &[ts as f64])).unwrap();
        }
        assert_eq!(stream.len(), 3);
        let ts: Vec<i64> = stream.iter().map(Sample::timestamp).collect();
        assert_eq!(ts, vec![2, 3, 4]);

        let window = stream.contiguous_tail(2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].timestamp(), 3);
        assert_eq!(window[1].timestamp(), 4);
    }

    #[test]
    fn test_stream_rejects_older_timestamp() {
        let mut stream = SampleStream::with_capacity(10).unwrap();
        stream.push(sample(100, &[1.0])).unwrap();
        stream.push(sample(100, &[1.0])).unwrap();
        let err = stream.push(sample(99, &[1.0])).unwrap_err();
        assert!(matches!(
            err,
            SpcError::NonMonotonicTimestamp {
                previous: 100,
                current: 99
            }
        ));
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_tail_shorter_than_stream() {
        let mut stream = SampleStream::with_capacity(10).unwrap();
        for ts in 0..4 {
            stream.push(sample(ts, &[1.0])).unwrap();
        }
        assert_eq!(stream.tail(2).len(), 2);
        assert_eq!(stream.tail(2).next().map(Sample::timestamp), Some(2));
        assert_eq!(stream.tail(20).len(), 4);
        assert_eq!(stream.contiguous_tail(20).len(), 4);
        assert_eq!(stream.latest().map(Sample::timestamp), Some(3));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(SampleStream::with_capacity(0).is_err());
    }
}
