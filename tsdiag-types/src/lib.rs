//! Shared data model, result records, configuration, and errors for tsdiag.
#![warn(missing_docs)]

mod config;
mod error;
mod frequency;
mod reports;
mod results;
mod series;
mod source;

pub use config::{
    AdfConfig, BoundaryGapPolicy, CacheConfig, DEFAULT_DECOMPOSITION_PERIOD,
    DEFAULT_ROLLING_WINDOW, DiagnosticsConfig, LagSelection, ROLLING_WINDOW_RANGE,
};
pub use error::DiagError;
pub use frequency::Frequency;
pub use reports::{CleaningSummary, DiagnosticsReport};
pub use results::{
    CriticalValues, DEFAULT_SIGNIFICANCE, DecompositionResult, RollingWindowResult,
    StationarityVerdict,
};
pub use series::{Observation, TimeSeries};
pub use source::SourceKey;
