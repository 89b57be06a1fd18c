use tsdiag_types::{DiagError, SourceKey, TimeSeries};

/// A provider of one raw time series.
///
/// Implementations read a fixed, already-available dataset (a file, an
/// in-memory fixture). `key` must change whenever the content `load` would
/// return changes, so callers can memoize loads by key.
pub trait SeriesSource: Send + Sync {
    /// Short, stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Identity of the source at its current revision.
    ///
    /// # Errors
    /// `Source` if the identity cannot be determined (e.g. the file is gone).
    fn key(&self) -> Result<SourceKey, DiagError>;

    /// Read the raw series: time-ordered, duplicates rejected, gaps kept as missing.
    ///
    /// # Errors
    /// `Source`, `Parse`, or `DuplicateTimestamp` depending on what went wrong.
    fn load(&self) -> Result<TimeSeries, DiagError>;
}
