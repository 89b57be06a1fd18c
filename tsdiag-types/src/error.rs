use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tsdiag workspace.
///
/// The first six variants are data-quality conditions raised by the pipeline
/// stages; they require caller intervention (re-clean the series, pick another
/// window or period) and are never retried. The remaining variants cover input
/// parsing, source access, and argument validation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum DiagError {
    /// Two observations share the same timestamp.
    #[error("duplicate timestamp: {ts}")]
    DuplicateTimestamp {
        /// The repeated timestamp.
        ts: DateTime<Utc>,
    },

    /// Missing values at the start or end of the series have no bounding value
    /// on one side and cannot be interpolated.
    #[error("unfillable boundary gap: leading={leading} trailing={trailing}")]
    UnfillableBoundaryGap {
        /// Length of the leading missing run.
        leading: usize,
        /// Length of the trailing missing run.
        trailing: usize,
    },

    /// The series is too short for the requested computation.
    #[error("insufficient data: required at least {required} observations, got {got}")]
    InsufficientData {
        /// Minimum number of observations needed.
        required: usize,
        /// Number of observations supplied.
        got: usize,
    },

    /// A multiplicative model met a zero or negative value.
    #[error("non-positive value {value} at position {index}")]
    NonPositiveValue {
        /// Position of the offending observation.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The rolling window does not fit the series.
    #[error("invalid window {window} for series of length {len}")]
    InvalidWindow {
        /// Requested window size.
        window: usize,
        /// Length of the series.
        len: usize,
    },

    /// The stage requires a fully defined series.
    #[error("series contains {count} missing values")]
    ContainsMissingValues {
        /// Number of missing values found.
        count: usize,
    },

    /// A record in a persisted input could not be parsed.
    #[error("parse error at line {line}, column '{column}': {msg}")]
    Parse {
        /// 1-based line number of the record (header is line 1).
        line: u64,
        /// Column name.
        column: String,
        /// Human-readable description.
        msg: String,
    },

    /// A data source could not be read.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Name of the source that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Numerical or structural issue with the data (degenerate regression, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl DiagError {
    /// Helper: build an `InsufficientData` error.
    #[must_use]
    pub const fn insufficient(required: usize, got: usize) -> Self {
        Self::InsufficientData { required, got }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Parse` error for a record line and column.
    pub fn parse(line: u64, column: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column: column.into(),
            msg: msg.into(),
        }
    }

    /// Returns true for the data-quality conditions raised by pipeline stages.
    ///
    /// These describe the series itself rather than how it was read or which
    /// arguments were passed.
    #[must_use]
    pub const fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTimestamp { .. }
                | Self::UnfillableBoundaryGap { .. }
                | Self::InsufficientData { .. }
                | Self::NonPositiveValue { .. }
                | Self::InvalidWindow { .. }
                | Self::ContainsMissingValues { .. }
        )
    }
}
