use tsdiag_core::TimeSeries;

use super::generators::{
    exponential_trend, price_path, seasonal_multiplicative, white_noise, with_dropped, with_gaps,
};

/// Canned series by name, for sources and examples.
///
/// - `NOISE`: 500 days of white noise around 100.
/// - `TREND`: 500 days of exponential growth.
/// - `SEASONAL`: 3 years of a weekly multiplicative pattern on a rising trend.
/// - `PRICES`: 800 days of a geometric random walk from 100.
/// - `GAPPY`: `PRICES` with interior missing values and dropped days.
/// - `EDGES`: `NOISE` with missing values at both ends.
#[must_use]
pub fn by_name(name: &str) -> Option<TimeSeries> {
    match name {
        "NOISE" => Some(white_noise(500, 100.0, 7)),
        "TREND" => Some(exponential_trend(500, 0.005, 11)),
        "SEASONAL" => Some(seasonal_multiplicative(3 * 365, 7, 13)),
        "PRICES" => Some(price_path(800, 100.0, 0.01, 17)),
        "GAPPY" => {
            let base = price_path(800, 100.0, 0.01, 17);
            let dropped = with_dropped(&base, &[40, 41, 42, 300, 555]);
            Some(with_gaps(&dropped, &[10, 11, 200, 201, 202, 600]))
        }
        "EDGES" => Some(with_gaps(&white_noise(500, 100.0, 7), &[0, 1, 2, 499])),
        _ => None,
    }
}
