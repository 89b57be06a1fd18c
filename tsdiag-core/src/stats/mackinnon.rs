//! MacKinnon (1994, 2010) response surfaces for the Dickey-Fuller
//! distribution with a constant and one integrated variable.

use tsdiag_types::CriticalValues;

use super::normal::normal_cdf;

/// Above this statistic the p-value is 1.
const TAU_MAX: f64 = 2.74;
/// Below this statistic the p-value is 0.
const TAU_MIN: f64 = -18.83;
/// Switch point between the small-p and large-p polynomials.
const TAU_STAR: f64 = -1.61;

const SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038_269];
const LARGE_P: [f64; 4] = [1.7339, 0.932_02, -0.127_45, -0.010_368];

const CRIT_1: [f64; 4] = [-3.430_35, -6.5393, -16.786, -79.433];
const CRIT_5: [f64; 4] = [-2.861_54, -2.8903, -4.234, -40.040];
const CRIT_10: [f64; 4] = [-2.566_77, -1.5384, -2.809, 0.0];

fn polyval(coef: &[f64], x: f64) -> f64 {
    coef.iter().rev().fold(0.0_f64, |acc, c| acc.mul_add(x, *c))
}

/// Approximate asymptotic p-value of an ADF statistic.
#[must_use]
pub fn mackinnon_p(stat: f64) -> f64 {
    if stat > TAU_MAX {
        return 1.0;
    }
    if stat < TAU_MIN {
        return 0.0;
    }
    let z = if stat <= TAU_STAR {
        polyval(&SMALL_P, stat)
    } else {
        polyval(&LARGE_P, stat)
    };
    normal_cdf(z)
}

fn surface(coef: &[f64; 4], nobs: usize) -> f64 {
    polyval(coef, 1.0 / nobs as f64)
}

/// Finite-sample critical values for `nobs` regression observations.
#[must_use]
pub fn mackinnon_crit(nobs: usize) -> CriticalValues {
    CriticalValues {
        one_pct: surface(&CRIT_1, nobs),
        five_pct: surface(&CRIT_5, nobs),
        ten_pct: surface(&CRIT_10, nobs),
    }
}
