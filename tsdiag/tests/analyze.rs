mod helpers;

use std::sync::Arc;

use helpers::{same_outputs, write_csv};
use tsdiag::{
    BoundaryGapPolicy, CacheConfig, CachingSource, CsvSource, DEFAULT_SIGNIFICANCE, DiagError,
    Diagnostics, Frequency, SeriesSource,
};
use tsdiag_mock::MockSource;
use tsdiag_mock::fixtures::{by_name, white_noise};

#[test]
fn full_run_on_two_years_of_prices() {
    let series = by_name("PRICES").unwrap();
    let report = Diagnostics::builder().build().unwrap().analyze(&series).unwrap();

    assert!(report.is_complete(), "errors: {:?}", report.errors());
    assert_eq!(report.cleaned, series);
    assert_eq!(report.cleaning.interpolated, 0);

    let weekly = report.resampled.as_ref().unwrap();
    assert_eq!(weekly.len(), 115);

    let d = report.decomposition.as_ref().unwrap();
    assert_eq!(d.period, 365);
    assert_eq!(d.trend.len(), 800);

    let r = report.rolling.as_ref().unwrap();
    assert_eq!(r.window, 30);
    assert_eq!(r.mean.values().filter(Option::is_some).count(), 800 - 29);

    let v = report.stationarity.as_ref().unwrap();
    assert_eq!(v.nobs, 800 - 1 - v.used_lag);
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let series = by_name("PRICES").unwrap();
    let par = Diagnostics::builder().parallel(true).build().unwrap();
    let seq = Diagnostics::builder().parallel(false).build().unwrap();
    let a = par.analyze(&series).unwrap();
    let b = seq.analyze(&series).unwrap();
    assert!(same_outputs(&a, &b));
}

#[test]
fn one_failing_analysis_does_not_hide_the_others() {
    let series = white_noise(200, 100.0, 3);
    let report = Diagnostics::builder().build().unwrap().analyze(&series).unwrap();

    assert_eq!(
        report.decomposition,
        Err(DiagError::InsufficientData {
            required: 730,
            got: 200
        })
    );
    assert!(report.resampled.is_ok());
    assert!(report.rolling.is_ok());
    let v = report.stationarity.as_ref().unwrap();
    assert!(v.rejects_unit_root(DEFAULT_SIGNIFICANCE));
    assert_eq!(report.errors().len(), 1);
    assert!(!report.is_complete());
}

#[test]
fn shorter_period_for_coarser_data() {
    let series = by_name("SEASONAL").unwrap();
    let report = Diagnostics::builder()
        .decomposition_period(7)
        .resample_frequency(Frequency::Monthly)
        .build()
        .unwrap()
        .analyze(&series)
        .unwrap();
    assert!(report.is_complete(), "errors: {:?}", report.errors());
    assert_eq!(report.decomposition.unwrap().seasonal_cycle.len(), 7);
    assert_eq!(report.resampled.unwrap().len(), 36);
}

#[test]
fn boundary_gaps_follow_the_policy() {
    let series = by_name("EDGES").unwrap();

    let strict = Diagnostics::builder().build().unwrap();
    assert_eq!(
        strict.analyze(&series).unwrap_err(),
        DiagError::UnfillableBoundaryGap {
            leading: 3,
            trailing: 1
        }
    );

    let lenient = Diagnostics::builder()
        .boundary_gaps(BoundaryGapPolicy::Trim)
        .build()
        .unwrap();
    let report = lenient.analyze(&series).unwrap();
    assert_eq!(report.cleaned.len(), 496);
    assert_eq!(report.cleaning.trimmed_leading, 3);
    assert_eq!(report.cleaning.trimmed_trailing, 1);
    assert_eq!(report.cleaned.first_ts(), Some(series.get(3).unwrap().ts));
}

#[test]
fn regularize_restores_absent_days() {
    let series = by_name("GAPPY").unwrap();

    let plain = Diagnostics::builder().build().unwrap();
    let (cleaned, summary) = plain.clean(&series).unwrap();
    assert_eq!(cleaned.len(), 795);
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.interpolated, 6);

    let regular = Diagnostics::builder().regularize(true).build().unwrap();
    let (cleaned, summary) = regular.clean(&series).unwrap();
    assert_eq!(cleaned.len(), 800);
    assert!(cleaned.is_complete());
    assert_eq!(summary.inserted, 5);
    assert_eq!(summary.interpolated, 11);
    assert_eq!(summary.input_len, 795);
}

#[test]
fn source_errors_propagate() {
    let src = MockSource::named("FAIL").unwrap();
    let err = Diagnostics::builder()
        .build()
        .unwrap()
        .analyze_source(&src)
        .unwrap_err();
    assert!(matches!(err, DiagError::Source { .. }));
}

#[test]
fn cached_source_is_loaded_once() {
    let mock = Arc::new(MockSource::named("NOISE").unwrap());
    let cached = CachingSource::new(
        Arc::clone(&mock) as Arc<dyn SeriesSource>,
        &CacheConfig::default(),
    );
    let diagnostics = Diagnostics::builder().build().unwrap();

    let a = diagnostics.analyze_source(&cached).unwrap();
    let b = diagnostics.analyze_source(&cached).unwrap();
    assert!(same_outputs(&a, &b));
    assert_eq!(mock.load_count(), 1);
}

#[test]
fn csv_file_end_to_end() {
    let series = by_name("SEASONAL").unwrap();
    let path = write_csv("seasonal.csv", &series);
    let report = Diagnostics::builder()
        .decomposition_period(7)
        .build()
        .unwrap()
        .analyze_source(&CsvSource::new(path))
        .unwrap();
    assert_eq!(report.cleaned, series);
    assert!(report.is_complete(), "errors: {:?}", report.errors());
}

#[test]
fn builder_rejects_out_of_range_parameters() {
    for window in [0, 6, 101] {
        let err = Diagnostics::builder().rolling_window(window).build().unwrap_err();
        assert!(matches!(err, DiagError::InvalidArg(_)), "window {window}");
    }
    assert!(Diagnostics::builder().rolling_window(7).build().is_ok());
    assert!(Diagnostics::builder().rolling_window(100).build().is_ok());

    let err = Diagnostics::builder().decomposition_period(1).build().unwrap_err();
    assert!(matches!(err, DiagError::InvalidArg(_)));
}
