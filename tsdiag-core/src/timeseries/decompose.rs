use tsdiag_types::{DecompositionResult, DiagError, TimeSeries};

/// Centered moving average with the classical decomposition filter.
///
/// Odd `period`: equal weights `1/period` over `period` points.
/// Even `period`: weights `[0.5, 1, …, 1, 0.5] / period` over `period + 1`
/// points, i.e. a 2×`period` average whose center lands on an observation.
/// The first and last `period / 2` positions are undefined.
fn centered_moving_average(x: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = x.len();
    let half = period / 2;
    let mut out = vec![None; n];
    if n < 2 * half + 1 {
        return out;
    }
    let p = period as f64;
    for (j, slot) in out.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &x[j - half..=j + half];
        let sum: f64 = if period % 2 == 0 {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            0.5f64.mul_add(window[0] + window[window.len() - 1], inner)
        } else {
            window.iter().sum()
        };
        *slot = Some(sum / p);
    }
    out
}

/// Split a strictly positive series into trend, seasonal and residual parts
/// under the multiplicative model `observed = trend × seasonal × residual`.
///
/// 1. Trend: centered moving average over `period` observations.
/// 2. Detrended: `observed / trend` where the trend is defined.
/// 3. Seasonal: for each phase `i` in `0..period`, the mean of the detrended
///    values at positions `≡ i (mod period)`; the cycle is scaled to mean 1
///    and tiled over the whole series.
/// 4. Residual: `observed / (trend × seasonal)`.
///
/// Trend and residual are missing at the first and last `period / 2`
/// positions; the seasonal component is defined everywhere.
///
/// # Errors
/// - `InvalidArg` if `period < 2`.
/// - `ContainsMissingValues` if the series has gaps.
/// - `InsufficientData` if the series is shorter than `2 × period`.
/// - `NonPositiveValue` at the first zero or negative observation.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tsdiag::decompose", skip(series), fields(len = series.len()))
)]
pub fn decompose(series: &TimeSeries, period: usize) -> Result<DecompositionResult, DiagError> {
    if period < 2 {
        return Err(DiagError::InvalidArg(format!(
            "decomposition period must be at least 2, got {period}"
        )));
    }
    let x = series.dense_values()?;
    let n = x.len();
    let required = period.saturating_mul(2);
    if n < required {
        return Err(DiagError::insufficient(required, n));
    }
    if let Some((index, &value)) = x.iter().enumerate().find(|(_, v)| **v <= 0.0) {
        return Err(DiagError::NonPositiveValue { index, value });
    }

    let trend = centered_moving_average(&x, period);

    let mut sums = vec![0.0_f64; period];
    let mut counts = vec![0_usize; period];
    for (j, (&obs, t)) in x.iter().zip(&trend).enumerate() {
        if let Some(t) = t {
            sums[j % period] += obs / t;
            counts[j % period] += 1;
        }
    }
    let mut cycle = Vec::with_capacity(period);
    for (phase, (&sum, &count)) in sums.iter().zip(&counts).enumerate() {
        if count == 0 {
            return Err(DiagError::Data(format!(
                "no detrended values for seasonal phase {phase}"
            )));
        }
        cycle.push(sum / count as f64);
    }
    let level = cycle.iter().sum::<f64>() / period as f64;
    for c in &mut cycle {
        *c /= level;
    }

    let seasonal: Vec<f64> = (0..n).map(|j| cycle[j % period]).collect();
    let residual: Vec<Option<f64>> = x
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((&obs, t), &s)| t.map(|t| obs / (t * s)))
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(period, undefined_edges = period / 2, "decomposition complete");

    Ok(DecompositionResult {
        period,
        trend: series.with_values(trend)?,
        seasonal: series.with_values(seasonal.into_iter().map(Some).collect())?,
        residual: series.with_values(residual)?,
        seasonal_cycle: cycle,
    })
}
