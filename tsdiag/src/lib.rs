//! tsdiag runs a fixed set of diagnostics over one univariate price series.
//!
//! Overview
//! - Cleaning: optional timestamp regularization, then time-weighted
//!   interpolation of interior gaps. Missing runs at either end cannot be
//!   interpolated; the boundary policy either reports them or trims them.
//! - Analyses, all reading the same cleaned series:
//!   - resampling to daily, weekly or monthly means;
//!   - multiplicative trend/seasonal/residual decomposition;
//!   - trailing rolling mean and standard deviation;
//!   - Augmented Dickey-Fuller unit-root test with MacKinnon p-values.
//! - The analyses are independent and may run concurrently on the rayon pool;
//!   each keeps its own `Result` in the [`DiagnosticsReport`].
//!
//! Sources
//! - [`CsvSource`] reads `Date` / `Close` columns from a CSV file.
//! - [`CachingSource`] memoizes any source by its content-aware key.
//!
//! ```
//! use tsdiag::{Diagnostics, Frequency, TimeSeries};
//! # use chrono::{DateTime, TimeDelta};
//! # let t0 = DateTime::from_timestamp(0, 0).unwrap();
//! # let series = TimeSeries::from_values(
//! #     t0,
//! #     TimeDelta::days(1),
//! #     (0..800).map(|i| 100.0 + (f64::from(i) * 0.7).sin() + f64::from(i % 5)),
//! # ).unwrap();
//! let diagnostics = Diagnostics::builder()
//!     .resample_frequency(Frequency::Monthly)
//!     .rolling_window(30)
//!     .build()?;
//! let report = diagnostics.analyze(&series)?;
//! if let Ok(verdict) = &report.stationarity {
//!     println!("ADF {:.3}, p = {:.4}", verdict.statistic, verdict.p_value);
//! }
//! assert!(report.decomposition.is_ok());
//! # Ok::<(), tsdiag::DiagError>(())
//! ```
#![warn(missing_docs)]

mod clean;
pub(crate) mod core;

pub use crate::core::{Diagnostics, DiagnosticsBuilder};

pub use tsdiag_csv::{CsvOptions, CsvSource};
pub use tsdiag_middleware::CachingSource;

// Re-export the data model and stages for convenience
pub use tsdiag_core::{
    GapFill, SeriesSource, adf_test, adf_test_with, bucket_label, bucket_start, decompose,
    estimate_step_seconds, fill, fill_interior, regularize, resample, rolling,
};
pub use tsdiag_types::{
    AdfConfig, BoundaryGapPolicy, CacheConfig, CleaningSummary, CriticalValues,
    DEFAULT_DECOMPOSITION_PERIOD, DEFAULT_ROLLING_WINDOW, DEFAULT_SIGNIFICANCE,
    DecompositionResult, DiagError, DiagnosticsConfig, DiagnosticsReport, Frequency, LagSelection,
    Observation, ROLLING_WINDOW_RANGE, RollingWindowResult, SourceKey, StationarityVerdict,
    TimeSeries,
};
