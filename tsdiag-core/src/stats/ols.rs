use tsdiag_types::DiagError;

/// Relative pivot size below which a design matrix is treated as rank deficient.
const RANK_TOLERANCE: f64 = 1e-10;

/// Result of an ordinary least squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// Estimated coefficients, in column order.
    pub params: Vec<f64>,
    /// Standard errors of the coefficients.
    pub bse: Vec<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    /// Number of observations.
    pub nobs: usize,
}

impl OlsFit {
    /// t-statistic of coefficient `i`.
    #[must_use]
    pub fn tvalue(&self, i: usize) -> f64 {
        self.params[i] / self.bse[i]
    }

    /// Gaussian log-likelihood at the estimate.
    #[must_use]
    pub fn llf(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, counting every column as a parameter.
    #[must_use]
    pub fn aic(&self) -> f64 {
        2.0f64.mul_add(self.params.len() as f64, -2.0 * self.llf())
    }

    /// Bayesian information criterion, counting every column as a parameter.
    #[must_use]
    pub fn bic(&self) -> f64 {
        (self.nobs as f64)
            .ln()
            .mul_add(self.params.len() as f64, -2.0 * self.llf())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Fit `y = X β + ε` by Householder QR.
///
/// `columns` holds the regressors column by column, each of length `y.len()`.
/// Standard errors use `σ² = ssr / (n − k)`.
///
/// # Errors
/// - `InvalidArg` if a column length differs from `y.len()` or there are no columns.
/// - `InsufficientData` if there are not more observations than columns.
/// - `Data` if the design matrix is rank deficient or the fit is exact.
pub fn ols(y: &[f64], columns: &[Vec<f64>]) -> Result<OlsFit, DiagError> {
    let n = y.len();
    let k = columns.len();
    if k == 0 {
        return Err(DiagError::InvalidArg("regression needs at least one column".into()));
    }
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(DiagError::InvalidArg(format!(
            "column length {} does not match {n} observations",
            bad.len()
        )));
    }
    if n <= k {
        return Err(DiagError::insufficient(k + 1, n));
    }

    let mut a: Vec<Vec<f64>> = columns.to_vec();
    let mut b: Vec<f64> = y.to_vec();
    let col_norms: Vec<f64> = columns.iter().map(|c| dot(c, c).sqrt()).collect();

    for j in 0..k {
        let norm = dot(&a[j][j..], &a[j][j..]).sqrt();
        if norm <= RANK_TOLERANCE * col_norms[j] || norm == 0.0 {
            return Err(DiagError::Data(format!(
                "design matrix is rank deficient at column {j}"
            )));
        }
        let alpha = if a[j][j] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = a[j][j..].to_vec();
        v[0] -= alpha;
        let vv = dot(&v, &v);

        for col in a.iter_mut().skip(j) {
            let f = 2.0 * dot(&v, &col[j..]) / vv;
            for (ci, vi) in col[j..].iter_mut().zip(&v) {
                *ci -= f * vi;
            }
        }
        let f = 2.0 * dot(&v, &b[j..]) / vv;
        for (bi, vi) in b[j..].iter_mut().zip(&v) {
            *bi -= f * vi;
        }
    }

    // Back substitution: R β = (Qᵀy)[..k], with R[r][c] stored as a[c][r].
    let mut params = vec![0.0_f64; k];
    for r in (0..k).rev() {
        let mut acc = b[r];
        for c in (r + 1)..k {
            acc -= a[c][r] * params[c];
        }
        params[r] = acc / a[r][r];
    }

    let ssr: f64 = (0..n)
        .map(|i| {
            let fitted: f64 = columns.iter().zip(&params).map(|(c, p)| c[i] * p).sum();
            let e = y[i] - fitted;
            e * e
        })
        .sum();
    if ssr <= 0.0 || !ssr.is_finite() {
        return Err(DiagError::Data("regression fits the data exactly".into()));
    }

    // R⁻¹ (upper triangular), then diag((XᵀX)⁻¹) = row norms² of R⁻¹.
    let mut rinv = vec![vec![0.0_f64; k]; k];
    for c in 0..k {
        rinv[c][c] = 1.0 / a[c][c];
        for r in (0..c).rev() {
            let mut acc = 0.0;
            for m in (r + 1)..=c {
                acc += a[m][r] * rinv[m][c];
            }
            rinv[r][c] = -acc / a[r][r];
        }
    }
    let sigma2 = ssr / (n - k) as f64;
    let bse: Vec<f64> = rinv
        .iter()
        .map(|row| (sigma2 * dot(row, row)).sqrt())
        .collect();

    Ok(OlsFit {
        params,
        bse,
        ssr,
        nobs: n,
    })
}
