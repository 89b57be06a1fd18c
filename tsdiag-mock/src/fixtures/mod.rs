//! Deterministic synthetic series.
//!
//! Every generator is seeded, so a given `(n, seed)` always yields the same
//! values. Daily fixtures start at [`daily_origin`].

mod generators;
mod named;

pub use generators::{
    Gaussian, daily_origin, exponential_trend, price_path, seasonal_multiplicative, white_noise,
    with_dropped, with_gaps,
};
pub use named::by_name;
