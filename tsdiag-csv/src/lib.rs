//! tsdiag-csv
//!
//! [`SeriesSource`] for delimited text files with a header row, such as the
//! daily price exports `Date,Open,High,Low,Close,Adj Close,Volume`.
//!
//! Only the timestamp and value columns are read; other columns are ignored.
#![warn(missing_docs)]

use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use csv::ReaderBuilder;
use tsdiag_core::{DiagError, Observation, SeriesSource, SourceKey, TimeSeries};

mod parse;

const NAME: &str = "tsdiag-csv";

/// Column names and delimiter for a CSV input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Header of the timestamp column (matched case-insensitively, trimmed).
    pub ts_column: String,
    /// Header of the value column (matched case-insensitively, trimmed).
    pub value_column: String,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            ts_column: "Date".to_string(),
            value_column: "Close".to_string(),
            delimiter: b',',
        }
    }
}

/// A CSV file read as one univariate series.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

fn io_error(path: &Path, e: &std::io::Error) -> DiagError {
    DiagError::source_failed(NAME, format!("{}: {e}", path.display()))
}

fn find_column(headers: &csv::StringRecord, wanted: &str) -> Result<usize, DiagError> {
    let wanted = wanted.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| DiagError::parse(1, wanted, "column not found in header"))
}

impl CsvSource {
    /// Source for `path` with the default `Date` / `Close` columns.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    /// Source for `path` with explicit column names and delimiter.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Path this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a series from any reader using `options`.
    ///
    /// Rows may come in any order; they are sorted by timestamp. Empty cells
    /// and `null`, `NaN`, `nan`, `NA` become missing values.
    ///
    /// # Errors
    /// - `Parse` for a missing column or an unreadable cell, with its line.
    /// - `DuplicateTimestamp` if a timestamp appears twice.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tsdiag::csv::read", skip_all)
    )]
    pub fn read_from<R: Read>(reader: R, options: &CsvOptions) -> Result<TimeSeries, DiagError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| DiagError::parse(1, "", e.to_string()))?
            .clone();
        let ts_idx = find_column(&headers, &options.ts_column)?;
        let value_idx = find_column(&headers, &options.value_column)?;

        let mut obs = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let fallback_line = i as u64 + 2;
            let record = row.map_err(|e| {
                let line = e.position().map_or(fallback_line, csv::Position::line);
                DiagError::parse(line, "", e.to_string())
            })?;
            let line = record.position().map_or(fallback_line, csv::Position::line);

            let raw_ts = record.get(ts_idx).unwrap_or("");
            let ts = parse::timestamp(raw_ts).ok_or_else(|| {
                DiagError::parse(line, &options.ts_column, format!("invalid timestamp '{raw_ts}'"))
            })?;
            let value = parse::value(record.get(value_idx).unwrap_or(""))
                .map_err(|msg| DiagError::parse(line, &options.value_column, msg))?;
            obs.push(Observation { ts, value });
        }

        let series = TimeSeries::from_unsorted(obs)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = series.len(),
            missing = series.missing_count(),
            "csv series loaded"
        );
        Ok(series)
    }
}

impl SeriesSource for CsvSource {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Canonical path plus a fingerprint of the file's length and modification time.
    fn key(&self) -> Result<SourceKey, DiagError> {
        let canonical = fs::canonicalize(&self.path).map_err(|e| io_error(&self.path, &e))?;
        let meta = fs::metadata(&canonical).map_err(|e| io_error(&self.path, &e))?;
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_nanos());

        let mut h = DefaultHasher::new();
        meta.len().hash(&mut h);
        mtime.hash(&mut h);
        self.options.ts_column.hash(&mut h);
        self.options.value_column.hash(&mut h);
        self.options.delimiter.hash(&mut h);
        Ok(SourceKey::new(canonical.display().to_string(), h.finish()))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tsdiag::csv::load", skip(self), fields(path = %self.path.display()))
    )]
    fn load(&self) -> Result<TimeSeries, DiagError> {
        let file = File::open(&self.path).map_err(|e| io_error(&self.path, &e))?;
        Self::read_from(BufReader::new(file), &self.options)
    }
}
