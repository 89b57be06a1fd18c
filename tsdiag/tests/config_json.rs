use proptest::prelude::*;
use tsdiag::{
    BoundaryGapPolicy, DiagError, Diagnostics, DiagnosticsConfig, Frequency, LagSelection,
    ROLLING_WINDOW_RANGE,
};

#[test]
fn json_config_drives_the_builder() {
    let cfg = DiagnosticsConfig::from_json_str(
        r#"{
            "resample_frequency": "monthly",
            "rolling_window": 14,
            "boundary_gaps": "Trim",
            "adf": { "max_lag": 4, "lag_selection": "Bic" }
        }"#,
    )
    .unwrap();
    let d = Diagnostics::from_config(cfg).unwrap();
    let c = d.config();
    assert_eq!(c.resample_frequency, Frequency::Monthly);
    assert_eq!(c.rolling_window, 14);
    assert_eq!(c.decomposition_period, 365);
    assert_eq!(c.boundary_gaps, BoundaryGapPolicy::Trim);
    assert_eq!(c.adf.max_lag, Some(4));
    assert_eq!(c.adf.lag_selection, LagSelection::Bic);
    assert!(c.parallel);
}

#[test]
fn report_serializes_with_per_stage_outcomes() {
    let series = tsdiag_mock::fixtures::white_noise(60, 10.0, 1);
    let report = Diagnostics::builder()
        .decomposition_period(7)
        .build()
        .unwrap()
        .analyze(&series)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["decomposition"]["Ok"]["seasonal_cycle"].is_array());
    assert!(json["stationarity"]["Ok"]["p_value"].is_number());
}

proptest! {
    #[test]
    fn window_validation_matches_the_interactive_range(window in 0usize..200) {
        let res = Diagnostics::builder().rolling_window(window).build();
        if ROLLING_WINDOW_RANGE.contains(&window) {
            prop_assert!(res.is_ok());
        } else {
            prop_assert!(matches!(res, Err(DiagError::InvalidArg(_))));
        }
    }
}
