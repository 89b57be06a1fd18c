/// Coefficients of the `erfcc` Chebyshev fit, lowest order first.
const ERFC_COEF: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

/// Complementary error function.
///
/// Chebyshev fit from Numerical Recipes (`erfcc`); fractional error below
/// 1.2e-7 everywhere.
#[must_use]
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / 0.5f64.mul_add(z, 1.0);
    let poly = ERFC_COEF.iter().rev().fold(0.0_f64, |acc, c| acc.mul_add(t, *c));
    let ans = t * (-z).mul_add(z, poly).exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}
