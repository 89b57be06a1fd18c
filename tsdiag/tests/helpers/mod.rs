// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tsdiag::{DiagnosticsReport, TimeSeries};

/// Write `series` as a `Date,Close` CSV under the temp dir and return its path.
pub fn write_csv(name: &str, series: &TimeSeries) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tsdiag-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let mut body = String::from("Date,Open,Close\n");
    for o in series {
        let close = o.value.map(|v| v.to_string()).unwrap_or_default();
        body.push_str(&format!("{},0,{close}\n", o.ts.format("%Y-%m-%d")));
    }
    fs::write(&path, body).unwrap();
    path
}

/// Compare everything but the configuration of two reports.
pub fn same_outputs(a: &DiagnosticsReport, b: &DiagnosticsReport) -> bool {
    a.cleaned == b.cleaned
        && a.cleaning == b.cleaning
        && a.resampled == b.resampled
        && a.decomposition == b.decomposition
        && a.rolling == b.rolling
        && a.stationarity == b.stationarity
}
