//! Time-series stages.
//!
//! Modules include:
//! - `gaps`: time-weighted interpolation and timestamp regularization
//! - `infer`: infer the sampling step
//! - `resample`: mean-aggregate to daily, weekly or monthly buckets
//! - `decompose`: multiplicative trend/seasonal/residual decomposition
//! - `rolling`: trailing-window mean and standard deviation
//! - `stationarity`: Augmented Dickey-Fuller unit-root test
/// Multiplicative seasonal decomposition.
pub mod decompose;
/// Gap filling and regularization.
pub mod gaps;
/// Sampling step inference.
pub mod infer;
/// Calendar-aligned mean resampling.
pub mod resample;
/// Trailing-window statistics.
pub mod rolling;
/// Augmented Dickey-Fuller test.
pub mod stationarity;
