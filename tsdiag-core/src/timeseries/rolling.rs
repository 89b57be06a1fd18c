use tsdiag_types::{DiagError, RollingWindowResult, TimeSeries};

/// Mean and sample standard deviation of one window, `None` if any value is missing.
fn window_stats(window: &[Option<f64>]) -> (Option<f64>, Option<f64>) {
    let Some(values) = window.iter().copied().collect::<Option<Vec<f64>>>() else {
        return (None, None);
    };
    let Some(&shift) = values.first() else {
        return (None, None);
    };
    let n = values.len() as f64;
    // Deviations from the first value are exact for a run of equal values,
    // so such a window has a mean equal to that value and zero spread.
    let offset = values.iter().map(|v| v - shift).sum::<f64>() / n;
    let mean = shift + offset;
    if values.len() < 2 {
        return (Some(mean), None);
    }
    let ss: f64 = values
        .iter()
        .map(|v| {
            let d = v - shift - offset;
            d * d
        })
        .sum();
    (Some(mean), Some((ss / (n - 1.0)).sqrt()))
}

/// Trailing moving mean and moving standard deviation over `window`
/// consecutive observations.
///
/// The window is positional: it covers the current observation and the
/// `window - 1` before it, regardless of elapsed time. Outputs at the first
/// `window - 1` positions are missing, as is any output whose window contains
/// a missing value. The standard deviation uses the n−1 denominator, so it is
/// missing everywhere when `window == 1`.
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use tsdiag_core::{rolling, TimeSeries};
///
/// let t0 = DateTime::from_timestamp(0, 0).unwrap();
/// let s = TimeSeries::from_values(t0, TimeDelta::days(1), [1.0, 2.0, 3.0, 4.0]).unwrap();
/// let r = rolling(&s, 2).unwrap();
/// let mean: Vec<_> = r.mean.values().collect();
/// assert_eq!(mean, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// ```
///
/// # Errors
/// `InvalidWindow` if `window` is zero or longer than the series.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tsdiag::rolling", skip(series), fields(len = series.len()))
)]
pub fn rolling(series: &TimeSeries, window: usize) -> Result<RollingWindowResult, DiagError> {
    let len = series.len();
    if window == 0 || window > len {
        return Err(DiagError::InvalidWindow { window, len });
    }

    let values: Vec<Option<f64>> = series.values().collect();
    let mut mean = vec![None; len];
    let mut std = vec![None; len];
    for end in (window - 1)..len {
        let (m, s) = window_stats(&values[end + 1 - window..=end]);
        mean[end] = m;
        std[end] = s;
    }

    Ok(RollingWindowResult {
        window,
        mean: series.with_values(mean)?,
        std: series.with_values(std)?,
    })
}
