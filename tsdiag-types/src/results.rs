//! Result records produced by the analytical stages.

use serde::{Deserialize, Serialize};

use crate::series::TimeSeries;

/// Conventional significance level for reading a [`StationarityVerdict`].
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Multiplicative decomposition `observed ≈ trend × seasonal × residual`.
///
/// All three series share the input's index. `trend` and `residual` are
/// missing at the first and last `period / 2` positions; `seasonal` is
/// defined everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Periodicity used for the decomposition.
    pub period: usize,
    /// Centered moving average of the observed series.
    pub trend: TimeSeries,
    /// Seasonal factors, tiled across the full series.
    pub seasonal: TimeSeries,
    /// `observed / (trend × seasonal)`.
    pub residual: TimeSeries,
    /// One full seasonal cycle (length `period`, mean 1).
    pub seasonal_cycle: Vec<f64>,
}

/// Trailing-window moving mean and sample standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingWindowResult {
    /// Window size in observations.
    pub window: usize,
    /// Moving mean; missing for the first `window - 1` positions.
    pub mean: TimeSeries,
    /// Moving standard deviation (n−1 denominator); missing for the first
    /// `window - 1` positions and everywhere when `window == 1`.
    pub std: TimeSeries,
}

/// ADF critical values for the 1%, 5% and 10% levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    /// 1% critical value.
    pub one_pct: f64,
    /// 5% critical value.
    pub five_pct: f64,
    /// 10% critical value.
    pub ten_pct: f64,
}

/// Outcome of an Augmented Dickey-Fuller unit-root test.
///
/// The null hypothesis is that the series has a unit root. Reading the
/// verdict is a consumer decision: a p-value at or below the chosen
/// significance level rejects the null (the series is treated as
/// stationary), above it the null is not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationarityVerdict {
    /// ADF t-statistic on the lagged level coefficient.
    pub statistic: f64,
    /// MacKinnon approximate p-value.
    pub p_value: f64,
    /// Number of lagged differences in the final regression.
    pub used_lag: usize,
    /// Observations used in the final regression.
    pub nobs: usize,
    /// Critical values for the regression sample size.
    pub critical_values: CriticalValues,
    /// Best information criterion, when the lag was selected by AIC or BIC.
    pub ic_best: Option<f64>,
}

impl StationarityVerdict {
    /// Whether the unit-root null is rejected at level `alpha`.
    #[must_use]
    pub fn rejects_unit_root(&self, alpha: f64) -> bool {
        self.p_value <= alpha
    }
}
