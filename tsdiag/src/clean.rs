use tsdiag_core::{estimate_step_seconds, fill_interior, regularize};
use tsdiag_types::{BoundaryGapPolicy, CleaningSummary, DiagError, DiagnosticsConfig, TimeSeries};

/// Regularize (when enabled), fill interior gaps, then apply the boundary policy.
pub fn clean(
    series: &TimeSeries,
    cfg: &DiagnosticsConfig,
) -> Result<(TimeSeries, CleaningSummary), DiagError> {
    let mut summary = CleaningSummary {
        input_len: series.len(),
        ..CleaningSummary::default()
    };

    let step = if cfg.regularize {
        estimate_step_seconds(series)
    } else {
        None
    };
    let regular = match step {
        Some(step) => {
            let r = regularize(series, step)?;
            summary.inserted = r.len() - series.len();
            r
        }
        None => series.clone(),
    };

    let filled = fill_interior(&regular)?;
    summary.interpolated = filled.interpolated;

    let cleaned = match cfg.boundary_gaps {
        BoundaryGapPolicy::Trim => {
            summary.trimmed_leading = filled.leading;
            summary.trimmed_trailing = filled.trailing;
            filled.trim_boundaries()
        }
        _ => filled.into_complete()?,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        input = summary.input_len,
        inserted = summary.inserted,
        interpolated = summary.interpolated,
        trimmed = summary.trimmed_leading + summary.trimmed_trailing,
        "series cleaned"
    );
    Ok((cleaned, summary))
}
