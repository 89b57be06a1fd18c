use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use proptest::prelude::*;
use tsdiag_core::{DiagError, SeriesSource};
use tsdiag_csv::{CsvOptions, CsvSource};

const PRICES: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2021-01-04,10,11,9,10.5,10.5,100
2021-01-05,10.5,12,10,11.0,11.0,120
2021-01-06,11,12,10,,11.2,90
2021-01-07,11,12,10,null,11.4,80
2021-01-08,11,12,10,12.0,12.0,95
";

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tsdiag-csv-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn reads_date_and_close_with_missing_markers() {
    let s = CsvSource::read_from(PRICES.as_bytes(), &CsvOptions::default()).unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(s.first_ts(), Some(date(2021, 1, 4)));
    let values: Vec<_> = s.values().collect();
    assert_eq!(
        values,
        vec![Some(10.5), Some(11.0), None, None, Some(12.0)]
    );
}

#[test]
fn header_match_ignores_case_and_padding() {
    let data = " date ; CLOSE \n2021-01-04 12:00:00;1.0\n2021-01-05 12:00:00;2.0\n";
    let opts = CsvOptions {
        delimiter: b';',
        ..CsvOptions::default()
    };
    let s = CsvSource::read_from(data.as_bytes(), &opts).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.get(1).unwrap().value, Some(2.0));
}

#[test]
fn unsorted_rows_are_ordered() {
    let data = "Date,Close\n2021-01-03,3\n2021-01-01,1\n2021-01-02,2\n";
    let s = CsvSource::read_from(data.as_bytes(), &CsvOptions::default()).unwrap();
    let values: Vec<_> = s.values().flatten().collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn duplicate_dates_are_rejected() {
    let data = "Date,Close\n2021-01-01,1\n2021-01-02,2\n2021-01-01,3\n";
    let err = CsvSource::read_from(data.as_bytes(), &CsvOptions::default()).unwrap_err();
    assert_eq!(
        err,
        DiagError::DuplicateTimestamp {
            ts: date(2021, 1, 1)
        }
    );
}

#[test]
fn bad_cells_report_line_and_column() {
    let data = "Date,Close\n2021-01-01,1\n2021-01-02,abc\n";
    let err = CsvSource::read_from(data.as_bytes(), &CsvOptions::default()).unwrap_err();
    match err {
        DiagError::Parse { line, column, .. } => {
            assert_eq!(line, 3);
            assert_eq!(column, "Close");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let data = "Date,Close\nyesterday,1\n";
    let err = CsvSource::read_from(data.as_bytes(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, DiagError::Parse { line: 2, .. }));
}

#[test]
fn missing_column_is_a_parse_error() {
    let data = "Date,Price\n2021-01-01,1\n";
    let err = CsvSource::read_from(data.as_bytes(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, DiagError::Parse { line: 1, .. }));
}

#[test]
fn file_source_loads_and_keys_by_content() {
    let path = temp_file("prices.csv", PRICES);
    let src = CsvSource::new(&path);
    assert_eq!(src.name(), "tsdiag-csv");
    assert_eq!(src.load().unwrap().len(), 5);

    let k1 = src.key().unwrap();
    assert_eq!(src.key().unwrap(), k1);

    fs::write(&path, format!("{PRICES}2021-01-11,11,12,10,12.5,12.5,70\n")).unwrap();
    let k2 = src.key().unwrap();
    assert_ne!(k1, k2);
    assert_eq!(k1.id(), k2.id());
    assert_eq!(src.load().unwrap().len(), 6);
}

#[test]
fn missing_file_is_a_source_error() {
    let src = CsvSource::new("/definitely/not/here.csv");
    assert!(matches!(src.load(), Err(DiagError::Source { .. })));
    assert!(matches!(src.key(), Err(DiagError::Source { .. })));
}

proptest! {
    #[test]
    fn generated_rows_read_back_in_date_order(
        rows in prop::collection::btree_map(
            0i64..5000,
            prop::option::weighted(0.8, -1e6f64..1e6),
            1..120,
        ),
    ) {
        // Written newest first; the reader has to sort.
        let mut text = String::from("Date,Close\n");
        for (day, value) in rows.iter().rev() {
            let ts = date(2000, 1, 1) + TimeDelta::days(*day);
            let cell = value.map(|v| v.to_string()).unwrap_or_default();
            text.push_str(&format!("{},{cell}\n", ts.format("%Y-%m-%d")));
        }

        let s = CsvSource::read_from(text.as_bytes(), &CsvOptions::default()).unwrap();
        prop_assert_eq!(s.len(), rows.len());
        for (o, (day, value)) in s.iter().zip(&rows) {
            prop_assert_eq!(o.ts, date(2000, 1, 1) + TimeDelta::days(*day));
            prop_assert_eq!(o.value, *value);
        }
    }
}
