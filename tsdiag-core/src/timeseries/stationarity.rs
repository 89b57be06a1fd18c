use tsdiag_types::{AdfConfig, DiagError, LagSelection, StationarityVerdict, TimeSeries};

use crate::stats::mackinnon::{mackinnon_crit, mackinnon_p};
use crate::stats::ols::{OlsFit, ols};

/// Shortest series the ADF test accepts.
pub const MIN_OBSERVATIONS: usize = 20;

/// One-sided 5% standard normal quantile, the stopping rule for t-stat lag selection.
const TSTAT_STOP: f64 = 1.644_853_626_951_472_2;

/// Largest lag order the constant-only regression supports for `n` observations.
const fn lag_cap(n: usize) -> usize {
    (n / 2).saturating_sub(2)
}

/// Schwert's rule `ceil(12 · (n/100)^(1/4))`, capped so the regression keeps
/// more observations than parameters.
#[must_use]
pub fn default_max_lag(n: usize) -> usize {
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    schwert.min(lag_cap(n))
}

/// Regression of `Δx_t` on `x_{t-1}`, `lags` lagged differences and a constant,
/// over the rows `first_row..` of the differenced series.
fn adf_regression(x: &[f64], dx: &[f64], lags: usize, first_row: usize) -> Result<OlsFit, DiagError> {
    let rows = first_row..dx.len();
    let y: Vec<f64> = dx[rows.clone()].to_vec();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(lags + 2);
    columns.push(rows.clone().map(|t| x[t]).collect());
    for l in 1..=lags {
        columns.push(rows.clone().map(|t| dx[t - l]).collect());
    }
    columns.push(vec![1.0; y.len()]);
    ols(&y, &columns)
}

/// Pick the lag order on the common sample that the largest lag allows.
fn select_lag(
    x: &[f64],
    dx: &[f64],
    max_lag: usize,
    rule: LagSelection,
) -> Result<(usize, Option<f64>), DiagError> {
    match rule {
        LagSelection::Fixed => Ok((max_lag, None)),
        LagSelection::Aic | LagSelection::Bic => {
            let mut best: Option<(f64, usize)> = None;
            for lags in 0..=max_lag {
                let fit = adf_regression(x, dx, lags, max_lag)?;
                let ic = if rule == LagSelection::Aic {
                    fit.aic()
                } else {
                    fit.bic()
                };
                // Strict comparison keeps the smaller lag on ties.
                if best.is_none_or(|(b, _)| ic < b) {
                    best = Some((ic, lags));
                }
            }
            Ok(best.map_or((0, None), |(ic, lags)| (lags, Some(ic))))
        }
        // `TStat`: walk down from the largest lag.
        _ => {
            for lags in (1..=max_lag).rev() {
                let fit = adf_regression(x, dx, lags, max_lag)?;
                // Last lagged difference sits just before the constant.
                if fit.tvalue(lags).abs() >= TSTAT_STOP {
                    return Ok((lags, None));
                }
            }
            Ok((0, None))
        }
    }
}

/// Augmented Dickey-Fuller test with a constant, AIC lag selection and the
/// default maximum lag.
///
/// # Errors
/// See [`adf_test_with`].
pub fn adf_test(series: &TimeSeries) -> Result<StationarityVerdict, DiagError> {
    adf_test_with(series, &AdfConfig::default())
}

/// Augmented Dickey-Fuller unit-root test.
///
/// Regresses `Δx_t` on `x_{t-1}`, `p` lagged differences and a constant; the
/// statistic is the t-value of the `x_{t-1}` coefficient. Lag orders are
/// compared on a common sample, then the chosen order is refit on every
/// available row. The p-value and critical values come from MacKinnon's
/// response surfaces.
///
/// # Errors
/// - `ContainsMissingValues` if the series has gaps.
/// - `InsufficientData` if fewer than [`MIN_OBSERVATIONS`] values are present.
/// - `InvalidArg` if `config.max_lag` leaves too few observations.
/// - `Data` if the regression is degenerate, e.g. a constant series.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tsdiag::adf", skip(series), fields(len = series.len()))
)]
pub fn adf_test_with(series: &TimeSeries, config: &AdfConfig) -> Result<StationarityVerdict, DiagError> {
    let x = series.dense_values()?;
    let n = x.len();
    if n < MIN_OBSERVATIONS {
        return Err(DiagError::insufficient(MIN_OBSERVATIONS, n));
    }
    let max_lag = match config.max_lag {
        Some(m) if m > lag_cap(n) => {
            return Err(DiagError::InvalidArg(format!(
                "max_lag {m} too large for {n} observations (at most {})",
                lag_cap(n)
            )));
        }
        Some(m) => m,
        None => default_max_lag(n),
    };

    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let (used_lag, ic_best) = select_lag(&x, &dx, max_lag, config.lag_selection)?;

    let fit = adf_regression(&x, &dx, used_lag, used_lag)?;
    let statistic = fit.tvalue(0);
    let nobs = fit.nobs;

    #[cfg(feature = "tracing")]
    tracing::debug!(max_lag, used_lag, nobs, statistic, "adf regression fitted");

    Ok(StationarityVerdict {
        statistic,
        p_value: mackinnon_p(statistic),
        used_lag,
        nobs,
        critical_values: mackinnon_crit(nobs),
        ic_best,
    })
}
