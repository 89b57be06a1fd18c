//! Configuration types shared by the orchestrator and middleware.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DiagError;
use crate::frequency::Frequency;

/// Allowed rolling window sizes for interactive callers.
pub const ROLLING_WINDOW_RANGE: RangeInclusive<usize> = 7..=100;

/// Default rolling window (observations).
pub const DEFAULT_ROLLING_WINDOW: usize = 30;

/// Default decomposition period for daily-cadence series.
pub const DEFAULT_DECOMPOSITION_PERIOD: usize = 365;

/// What the cleaning step does with missing runs at either end of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BoundaryGapPolicy {
    /// Surface `UnfillableBoundaryGap` to the caller.
    #[default]
    Error,
    /// Drop the leading and trailing missing runs.
    Trim,
}

/// How the ADF test picks the number of lagged differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LagSelection {
    /// Minimize the Akaike information criterion.
    #[default]
    Aic,
    /// Minimize the Bayesian information criterion.
    Bic,
    /// Start from the maximum lag and drop lags until the last one is
    /// significant at the 5% level.
    TStat,
    /// Use the maximum lag as-is.
    Fixed,
}

/// Options for the Augmented Dickey-Fuller test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdfConfig {
    /// Upper bound on lagged differences; `None` uses `ceil(12 * (n/100)^(1/4))`.
    pub max_lag: Option<usize>,
    /// Lag selection rule.
    pub lag_selection: LagSelection,
}

/// Memoization settings for loaded series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached series.
    pub max_capacity: u64,
    /// Optional time-to-live per entry.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 16,
            ttl: None,
        }
    }
}

/// Parameters for a full diagnostics run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Target frequency for the resampled view.
    pub resample_frequency: Frequency,
    /// Trailing window for rolling statistics; must lie in [`ROLLING_WINDOW_RANGE`].
    pub rolling_window: usize,
    /// Seasonal period for the multiplicative decomposition.
    pub decomposition_period: usize,
    /// Handling of unfillable missing runs at the series ends.
    pub boundary_gaps: BoundaryGapPolicy,
    /// Insert missing slots for absent timestamps before filling.
    pub regularize: bool,
    /// Stationarity test options.
    pub adf: AdfConfig,
    /// Evaluate the independent stages concurrently.
    pub parallel: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            resample_frequency: Frequency::Weekly,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            decomposition_period: DEFAULT_DECOMPOSITION_PERIOD,
            boundary_gaps: BoundaryGapPolicy::Error,
            regularize: false,
            adf: AdfConfig::default(),
            parallel: true,
        }
    }
}

impl DiagnosticsConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// `InvalidArg` if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, DiagError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| DiagError::InvalidArg(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    /// - `InvalidArg` if `rolling_window` lies outside [`ROLLING_WINDOW_RANGE`].
    /// - `InvalidArg` if `decomposition_period < 2`.
    pub fn validate(&self) -> Result<(), DiagError> {
        if !ROLLING_WINDOW_RANGE.contains(&self.rolling_window) {
            return Err(DiagError::InvalidArg(format!(
                "rolling_window must be in [{}, {}], got {}",
                ROLLING_WINDOW_RANGE.start(),
                ROLLING_WINDOW_RANGE.end(),
                self.rolling_window
            )));
        }
        if self.decomposition_period < 2 {
            return Err(DiagError::InvalidArg(format!(
                "decomposition_period must be at least 2, got {}",
                self.decomposition_period
            )));
        }
        Ok(())
    }
}
