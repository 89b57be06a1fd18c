//! Report envelope produced by the diagnostics orchestrator.

use serde::{Deserialize, Serialize};

use crate::config::DiagnosticsConfig;
use crate::error::DiagError;
use crate::results::{DecompositionResult, RollingWindowResult, StationarityVerdict};
use crate::series::TimeSeries;

/// What the cleaning step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Observations in the raw input.
    pub input_len: usize,
    /// Missing slots inserted for absent timestamps.
    pub inserted: usize,
    /// Values filled by interpolation.
    pub interpolated: usize,
    /// Leading missing observations dropped.
    pub trimmed_leading: usize,
    /// Trailing missing observations dropped.
    pub trimmed_trailing: usize,
}

/// Outputs of one diagnostics run over a cleaned series.
///
/// The four consumers are independent; each outcome is kept separately so a
/// failure in one (e.g. a series too short to decompose) does not hide the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Parameters the run used.
    pub config: DiagnosticsConfig,
    /// The gap-filled series every consumer read.
    pub cleaned: TimeSeries,
    /// Changes made while cleaning.
    pub cleaning: CleaningSummary,
    /// Mean-aggregated view at `config.resample_frequency`.
    pub resampled: Result<TimeSeries, DiagError>,
    /// Multiplicative decomposition at `config.decomposition_period`.
    pub decomposition: Result<DecompositionResult, DiagError>,
    /// Rolling mean and standard deviation at `config.rolling_window`.
    pub rolling: Result<RollingWindowResult, DiagError>,
    /// ADF test on the cleaned (not resampled) series.
    pub stationarity: Result<StationarityVerdict, DiagError>,
}

impl DiagnosticsReport {
    /// Errors raised by any consumer, in stage order.
    #[must_use]
    pub fn errors(&self) -> Vec<&DiagError> {
        [
            self.resampled.as_ref().err(),
            self.decomposition.as_ref().err(),
            self.rolling.as_ref().err(),
            self.stationarity.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Whether every consumer succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }
}
