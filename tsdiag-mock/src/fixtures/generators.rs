use std::f64::consts::TAU;

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsdiag_core::TimeSeries;

/// 2020-01-01 00:00 UTC, the first timestamp of every daily fixture.
#[must_use]
pub fn daily_origin() -> DateTime<Utc> {
    DateTime::from_timestamp(1_577_836_800, 0).expect("origin in range")
}

/// Seeded standard normal draws (Box-Muller).
pub struct Gaussian {
    rng: StdRng,
}

impl Gaussian {
    /// Sampler whose draws are fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next draw from `N(0, 1)`.
    pub fn sample(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

fn daily(values: Vec<f64>) -> TimeSeries {
    TimeSeries::from_values(daily_origin(), TimeDelta::days(1), values).expect("finite daily fixture")
}

/// `level + N(0, 1)` noise: stationary around a constant mean.
#[must_use]
pub fn white_noise(n: usize, level: f64, seed: u64) -> TimeSeries {
    let mut g = Gaussian::new(seed);
    daily((0..n).map(|_| level + g.sample()).collect())
}

/// `100 · e^(rate·t)` with 0.1% multiplicative noise: a strongly trending level.
#[must_use]
pub fn exponential_trend(n: usize, rate: f64, seed: u64) -> TimeSeries {
    let mut g = Gaussian::new(seed);
    daily(
        (0..n)
            .map(|t| 100.0 * (rate * t as f64).exp() * 0.001f64.mul_add(g.sample(), 1.0))
            .collect(),
    )
}

/// Geometric random walk starting at `start`, daily log-return sd `vol`.
#[must_use]
pub fn price_path(n: usize, start: f64, vol: f64, seed: u64) -> TimeSeries {
    let mut g = Gaussian::new(seed);
    let mut level = start;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(level);
        level *= (vol * g.sample()).exp();
    }
    daily(out)
}

/// Linear trend × sinusoidal season × small multiplicative noise; strictly positive.
#[must_use]
pub fn seasonal_multiplicative(n: usize, period: usize, seed: u64) -> TimeSeries {
    let mut g = Gaussian::new(seed);
    daily(
        (0..n)
            .map(|t| {
                let trend = 0.05f64.mul_add(t as f64, 100.0);
                let season = 0.1f64.mul_add((TAU * t as f64 / period as f64).sin(), 1.0);
                let noise = 0.01f64.mul_add(g.sample(), 1.0);
                trend * season * noise
            })
            .collect(),
    )
}

/// Copy of `series` with the values at `positions` marked missing.
///
/// Positions past the end are ignored.
#[must_use]
pub fn with_gaps(series: &TimeSeries, positions: &[usize]) -> TimeSeries {
    let values = series
        .values()
        .enumerate()
        .map(|(i, v)| if positions.contains(&i) { None } else { v })
        .collect();
    series.with_values(values).expect("same length")
}

/// Copy of `series` without the observations at `positions`, leaving holes
/// in the timestamp index.
#[must_use]
pub fn with_dropped(series: &TimeSeries, positions: &[usize]) -> TimeSeries {
    let obs = series
        .iter()
        .enumerate()
        .filter(|(i, _)| !positions.contains(i))
        .map(|(_, o)| *o)
        .collect();
    TimeSeries::new(obs).expect("subset stays ordered")
}
