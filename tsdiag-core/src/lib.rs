//! tsdiag-core
//!
//! The analytical stages of the tsdiag pipeline, each a pure function from an
//! immutable [`TimeSeries`] to a freshly allocated result.
//!
//! - `source`: the `SeriesSource` trait implemented by loaders.
//! - `timeseries`: gap filling, cadence inference, resampling, decomposition,
//!   rolling statistics, and the ADF stationarity test.
//! - `stats`: small numeric kernels (least squares, normal CDF, MacKinnon tables).
//!
//! Stages hold no state between calls and never mutate their input, so the
//! consumers of a cleaned series can be evaluated concurrently.
#![warn(missing_docs)]

/// The loader trait and its identity key.
pub mod source;
/// Numeric kernels used by the stationarity test.
pub mod stats;
/// Time-series stages.
pub mod timeseries;

pub use source::SeriesSource;
pub use timeseries::decompose::decompose;
pub use timeseries::gaps::{GapFill, fill, fill_interior, regularize};
pub use timeseries::infer::estimate_step_seconds;
pub use timeseries::resample::{bucket_label, bucket_start, next_bucket, resample};
pub use timeseries::rolling::rolling;
pub use timeseries::stationarity::{adf_test, adf_test_with, default_max_lag};
pub use tsdiag_types::*;
