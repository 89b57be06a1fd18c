use tsdiag_core::{SeriesSource, adf_test_with, decompose, resample, rolling};
use tsdiag_types::{
    AdfConfig, BoundaryGapPolicy, CleaningSummary, DiagError, DiagnosticsConfig,
    DiagnosticsReport, Frequency, LagSelection, TimeSeries,
};

use crate::clean;

/// Runs the cleaning step and the four analyses over one series.
///
/// Cleaning happens first and must succeed; resampling, decomposition,
/// rolling statistics and the stationarity test then read the same cleaned
/// series and report their outcomes independently.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    cfg: DiagnosticsConfig,
}

/// Builder for [`Diagnostics`].
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsBuilder {
    cfg: DiagnosticsConfig,
}

impl DiagnosticsBuilder {
    /// Start from the default configuration: weekly resampling, a 30-observation
    /// rolling window, a 365-observation seasonal period, strict boundary
    /// handling, AIC lag selection and parallel evaluation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration, e.g. one read from JSON.
    #[must_use]
    pub fn config(mut self, cfg: DiagnosticsConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Frequency of the resampled view.
    #[must_use]
    pub const fn resample_frequency(mut self, freq: Frequency) -> Self {
        self.cfg.resample_frequency = freq;
        self
    }

    /// Trailing window for rolling statistics; checked by [`build`](Self::build).
    #[must_use]
    pub const fn rolling_window(mut self, window: usize) -> Self {
        self.cfg.rolling_window = window;
        self
    }

    /// Seasonal period for the decomposition.
    ///
    /// Use a period that matches the cadence of the cleaned series: 365 for
    /// daily data, 52 for weekly, 12 for monthly.
    #[must_use]
    pub const fn decomposition_period(mut self, period: usize) -> Self {
        self.cfg.decomposition_period = period;
        self
    }

    /// What cleaning does with missing runs at the series ends.
    ///
    /// - `Error` surfaces `UnfillableBoundaryGap` and no analysis runs.
    /// - `Trim` drops those runs; the analyses see a shorter series.
    #[must_use]
    pub const fn boundary_gaps(mut self, policy: BoundaryGapPolicy) -> Self {
        self.cfg.boundary_gaps = policy;
        self
    }

    /// Insert missing observations for absent timestamps before filling.
    ///
    /// The grid step is inferred from the series. Weekday-only prices gain
    /// weekend slots, which are then interpolated.
    #[must_use]
    pub const fn regularize(mut self, yes: bool) -> Self {
        self.cfg.regularize = yes;
        self
    }

    /// Stationarity test options.
    #[must_use]
    pub const fn adf(mut self, adf: AdfConfig) -> Self {
        self.cfg.adf = adf;
        self
    }

    /// ADF lag selection rule.
    #[must_use]
    pub const fn lag_selection(mut self, rule: LagSelection) -> Self {
        self.cfg.adf.lag_selection = rule;
        self
    }

    /// Evaluate the four analyses on the rayon pool. Results do not depend on it.
    #[must_use]
    pub const fn parallel(mut self, yes: bool) -> Self {
        self.cfg.parallel = yes;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// `InvalidArg` if the rolling window lies outside `[7, 100]` or the
    /// decomposition period is below 2.
    pub fn build(self) -> Result<Diagnostics, DiagError> {
        self.cfg.validate()?;
        Ok(Diagnostics { cfg: self.cfg })
    }
}

impl Diagnostics {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> DiagnosticsBuilder {
        DiagnosticsBuilder::new()
    }

    /// Orchestrator for an already assembled configuration.
    ///
    /// # Errors
    /// `InvalidArg` if the configuration fails validation.
    pub fn from_config(cfg: DiagnosticsConfig) -> Result<Self, DiagError> {
        DiagnosticsBuilder::new().config(cfg).build()
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &DiagnosticsConfig {
        &self.cfg
    }

    /// Produce the gap-free series the analyses consume.
    ///
    /// # Errors
    /// `UnfillableBoundaryGap` under the `Error` boundary policy when the
    /// series starts or ends with missing values.
    pub fn clean(&self, series: &TimeSeries) -> Result<(TimeSeries, CleaningSummary), DiagError> {
        clean::clean(series, &self.cfg)
    }

    /// Clean `series`, then run every analysis on the cleaned result.
    ///
    /// # Errors
    /// Only cleaning errors; per-analysis failures are kept in the report.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsdiag::analyze",
            skip(self, series),
            fields(len = series.len(), parallel = self.cfg.parallel)
        )
    )]
    pub fn analyze(&self, series: &TimeSeries) -> Result<DiagnosticsReport, DiagError> {
        let (cleaned, cleaning) = self.clean(series)?;
        let cfg = &self.cfg;
        let s = &cleaned;

        let run_resample = || resample(s, cfg.resample_frequency);
        let run_decompose = || decompose(s, cfg.decomposition_period);
        let run_rolling = || rolling(s, cfg.rolling_window);
        let run_adf = || adf_test_with(s, &cfg.adf);

        let ((resampled, decomposition), (rolling, stationarity)) = if cfg.parallel {
            rayon::join(
                || rayon::join(run_resample, run_decompose),
                || rayon::join(run_rolling, run_adf),
            )
        } else {
            ((run_resample(), run_decompose()), (run_rolling(), run_adf()))
        };

        let report = DiagnosticsReport {
            config: cfg.clone(),
            cleaned,
            cleaning,
            resampled,
            decomposition,
            rolling,
            stationarity,
        };
        #[cfg(feature = "tracing")]
        for err in report.errors() {
            tracing::warn!(error = %err, "analysis step failed");
        }
        Ok(report)
    }

    /// Load a series from `source`, then [`analyze`](Self::analyze) it.
    ///
    /// # Errors
    /// Load errors from the source, then cleaning errors.
    pub fn analyze_source(&self, source: &dyn SeriesSource) -> Result<DiagnosticsReport, DiagError> {
        let series = source.load()?;
        self.analyze(&series)
    }
}
