//! The time-series value type shared by every pipeline stage.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DiagError;

/// A single `(timestamp, value)` pair. `value` is `None` when missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Observed value, or `None` when explicitly missing.
    pub value: Option<f64>,
}

impl Observation {
    /// A defined observation.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, value: f64) -> Self {
        Self {
            ts,
            value: Some(value),
        }
    }

    /// An explicitly missing observation.
    #[must_use]
    pub const fn missing(ts: DateTime<Utc>) -> Self {
        Self { ts, value: None }
    }
}

/// An immutable, strictly time-ordered univariate series.
///
/// Invariants, enforced by every constructor:
/// - timestamps are strictly increasing (no duplicates);
/// - every defined value is finite.
///
/// Stages never mutate a `TimeSeries`; they build a new one. A series can
/// therefore be shared across threads and read by several stages at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct TimeSeries {
    obs: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from observations already in time order.
    ///
    /// # Errors
    /// - `DuplicateTimestamp` if two adjacent observations share a timestamp.
    /// - `InvalidArg` if timestamps decrease.
    /// - `Data` if a defined value is not finite.
    pub fn new(obs: Vec<Observation>) -> Result<Self, DiagError> {
        for (i, o) in obs.iter().enumerate() {
            if let Some(v) = o.value
                && !v.is_finite()
            {
                return Err(DiagError::Data(format!(
                    "non-finite value {v} at position {i}"
                )));
            }
        }
        for (i, w) in obs.windows(2).enumerate() {
            if w[1].ts == w[0].ts {
                return Err(DiagError::DuplicateTimestamp { ts: w[1].ts });
            }
            if w[1].ts < w[0].ts {
                return Err(DiagError::InvalidArg(format!(
                    "timestamps not increasing at position {}: {} after {}",
                    i + 1,
                    w[1].ts,
                    w[0].ts
                )));
            }
        }
        Ok(Self { obs })
    }

    /// Sort observations by timestamp, then build the series.
    ///
    /// # Errors
    /// `DuplicateTimestamp` if any timestamp occurs twice, `Data` for non-finite values.
    pub fn from_unsorted(mut obs: Vec<Observation>) -> Result<Self, DiagError> {
        obs.sort_by_key(|o| o.ts);
        Self::new(obs)
    }

    /// Build a regularly spaced series of defined values starting at `start`.
    ///
    /// # Errors
    /// `InvalidArg` if `step` is not positive, `Data` for non-finite values.
    pub fn from_values<I>(start: DateTime<Utc>, step: TimeDelta, values: I) -> Result<Self, DiagError>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_options(start, step, values.into_iter().map(Some))
    }

    /// Like [`TimeSeries::from_values`] but with explicitly missing entries.
    ///
    /// # Errors
    /// `InvalidArg` if `step` is not positive, `Data` for non-finite values.
    pub fn from_options<I>(start: DateTime<Utc>, step: TimeDelta, values: I) -> Result<Self, DiagError>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        if step <= TimeDelta::zero() {
            return Err(DiagError::InvalidArg(format!(
                "step must be positive, got {step}"
            )));
        }
        let mut ts = start;
        let mut obs = Vec::new();
        for value in values {
            obs.push(Observation { ts, value });
            ts = ts
                .checked_add_signed(step)
                .ok_or_else(|| DiagError::InvalidArg("timestamp overflow".to_string()))?;
        }
        Self::new(obs)
    }

    /// Replace the values while keeping this series' index.
    ///
    /// # Errors
    /// `InvalidArg` on length mismatch, `Data` for non-finite values.
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Result<Self, DiagError> {
        if values.len() != self.obs.len() {
            return Err(DiagError::InvalidArg(format!(
                "expected {} values, got {}",
                self.obs.len(),
                values.len()
            )));
        }
        let obs = self
            .obs
            .iter()
            .zip(values)
            .map(|(o, value)| Observation { ts: o.ts, value })
            .collect();
        Self::new(obs)
    }

    /// Number of observations (defined or missing).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.obs.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    /// Borrow the observations.
    #[must_use]
    pub fn as_slice(&self) -> &[Observation] {
        &self.obs
    }

    /// Iterate over observations in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.obs.iter()
    }

    /// Observation at position `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Observation> {
        self.obs.get(i)
    }

    /// Iterate over the timestamps.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.obs.iter().map(|o| o.ts)
    }

    /// Iterate over the values (`None` where missing).
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.obs.iter().map(|o| o.value)
    }

    /// First timestamp, if any.
    #[must_use]
    pub fn first_ts(&self) -> Option<DateTime<Utc>> {
        self.obs.first().map(|o| o.ts)
    }

    /// Last timestamp, if any.
    #[must_use]
    pub fn last_ts(&self) -> Option<DateTime<Utc>> {
        self.obs.last().map(|o| o.ts)
    }

    /// Number of missing values.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.obs.iter().filter(|o| o.value.is_none()).count()
    }

    /// Whether every value is defined.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.obs.iter().all(|o| o.value.is_some())
    }

    /// All values as a dense vector.
    ///
    /// # Errors
    /// `ContainsMissingValues` if any value is missing.
    pub fn dense_values(&self) -> Result<Vec<f64>, DiagError> {
        let missing = self.missing_count();
        if missing > 0 {
            return Err(DiagError::ContainsMissingValues { count: missing });
        }
        Ok(self.obs.iter().filter_map(|o| o.value).collect())
    }

    /// Sub-series over positions `start..end` (clamped to the series length).
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.obs.len());
        let start = start.min(end);
        Self {
            obs: self.obs[start..end].to_vec(),
        }
    }

    /// Consume the series and return its observations.
    #[must_use]
    pub fn into_observations(self) -> Vec<Observation> {
        self.obs
    }
}

impl TryFrom<Vec<Observation>> for TimeSeries {
    type Error = DiagError;

    fn try_from(obs: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(obs)
    }
}

impl From<TimeSeries> for Vec<Observation> {
    fn from(s: TimeSeries) -> Self {
        s.obs
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.obs.iter()
    }
}
