use tsdiag_types::TimeSeries;

/// Whole-second gaps between adjacent timestamps.
fn step_deltas(series: &TimeSeries) -> Vec<i64> {
    let ts: Vec<_> = series.timestamps().collect();
    ts.windows(2).map(|w| (w[1] - w[0]).num_seconds()).collect()
}

/// Estimate a representative sampling step (in seconds) from adjacent
/// timestamp deltas.
///
/// Prefer the mode (most frequent delta); if there is no unique mode, return
/// the lower median so the result is an actually observed cadence.
///
/// Daily data with one missing day has deltas 1d,1d,2d,1d: the mode is one day.
///
/// ```
/// use chrono::DateTime;
/// use tsdiag_core::{estimate_step_seconds, Observation, TimeSeries};
///
/// let t = |d: i64| DateTime::from_timestamp(d * 86_400, 0).unwrap();
/// let s = TimeSeries::new(vec![
///     Observation::new(t(0), 1.0),
///     Observation::new(t(1), 1.0),
///     Observation::new(t(2), 1.0),
///     Observation::new(t(4), 1.0),
///     Observation::new(t(5), 1.0),
/// ]).unwrap();
/// assert_eq!(estimate_step_seconds(&s), Some(86_400));
/// ```
///
/// Returns `None` if fewer than two observations are present.
#[must_use]
pub fn estimate_step_seconds(series: &TimeSeries) -> Option<i64> {
    let mut deltas = step_deltas(series);
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();

    // Runs of equal deltas in sorted order; the longest run is the mode.
    let runs: Vec<(i64, usize)> = deltas
        .chunk_by(|a, b| a == b)
        .map(|run| (run[0], run.len()))
        .collect();
    let top = runs.iter().map(|&(_, len)| len).max()?;
    let mut modes = runs.iter().filter(|&&(_, len)| len == top);
    if let (Some(&(delta, _)), None) = (modes.next(), modes.next()) {
        return Some(delta);
    }

    Some(deltas[(deltas.len() - 1) / 2])
}
