//! Numeric kernels backing the stationarity test.
//!
//! - `ols`: least squares via Householder QR with coefficient standard errors
//! - `normal`: standard normal CDF
//! - `mackinnon`: MacKinnon response surfaces for ADF p-values and critical values
/// MacKinnon approximate p-values and critical values.
pub mod mackinnon;
/// Standard normal distribution helpers.
pub mod normal;
/// Ordinary least squares.
pub mod ols;
