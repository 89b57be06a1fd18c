//! Run the full diagnostics over a CSV file of daily prices.
//!
//! ```text
//! RUST_LOG=tsdiag=debug cargo run -p tsdiag --features tracing --example diagnose_csv -- BTC-EUR.csv
//! ```
//!
//! Without an argument the example runs on a synthetic price path.
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tsdiag::{
    BoundaryGapPolicy, CacheConfig, CachingSource, CsvSource, DEFAULT_SIGNIFICANCE, Diagnostics,
    Frequency, SeriesSource,
};
use tsdiag_mock::MockSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Pick the input: a CSV path from the command line, or a mock series.
    let source: Arc<dyn SeriesSource> = match std::env::args().nth(1) {
        Some(path) => Arc::new(CsvSource::new(path)),
        None => {
            println!("--- (no CSV given, using a synthetic price path) ---");
            Arc::new(MockSource::named("PRICES").ok_or("missing fixture")?)
        }
    };
    let source = CachingSource::new(source, &CacheConfig::default());

    // 2. Configure the run.
    let diagnostics = Diagnostics::builder()
        .resample_frequency(Frequency::Weekly)
        .rolling_window(30)
        .boundary_gaps(BoundaryGapPolicy::Trim)
        .build()?;

    // 3. Analyze.
    let report = diagnostics.analyze_source(&source)?;
    let c = &report.cleaning;
    println!(
        "cleaned {} -> {} observations ({} interpolated, {} trimmed)",
        c.input_len,
        report.cleaned.len(),
        c.interpolated,
        c.trimmed_leading + c.trimmed_trailing
    );

    match &report.resampled {
        Ok(s) => println!("{} {} buckets", s.len(), report.config.resample_frequency),
        Err(e) => println!("resample: {e}"),
    }
    match &report.decomposition {
        Ok(d) => {
            let max = d.seasonal_cycle.iter().copied().fold(f64::MIN, f64::max);
            let min = d.seasonal_cycle.iter().copied().fold(f64::MAX, f64::min);
            println!("seasonal factors span [{min:.4}, {max:.4}] over period {}", d.period);
        }
        Err(e) => println!("decomposition: {e}"),
    }
    match &report.rolling {
        Ok(r) => {
            if let Some(sd) = r.std.values().flatten().last() {
                println!("latest {}-day rolling std: {sd:.4}", r.window);
            }
        }
        Err(e) => println!("rolling: {e}"),
    }
    match &report.stationarity {
        Ok(v) => {
            println!(
                "ADF statistic {:.4}, p-value {:.4}, lags {}, 5% critical {:.4}",
                v.statistic, v.p_value, v.used_lag, v.critical_values.five_pct
            );
            if v.rejects_unit_root(DEFAULT_SIGNIFICANCE) {
                println!("unit root rejected: the series looks stationary");
            } else {
                println!("unit root not rejected: the series looks non-stationary");
            }
        }
        Err(e) => println!("stationarity: {e}"),
    }
    Ok(())
}
