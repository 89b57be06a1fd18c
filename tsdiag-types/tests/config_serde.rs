use std::time::Duration;

use tsdiag_types::{
    AdfConfig, BoundaryGapPolicy, CacheConfig, DiagError, DiagnosticsConfig, Frequency,
    LagSelection,
};

#[test]
fn diagnostics_config_roundtrip() {
    let cfg = DiagnosticsConfig {
        resample_frequency: Frequency::Monthly,
        rolling_window: 45,
        decomposition_period: 7,
        boundary_gaps: BoundaryGapPolicy::Trim,
        regularize: true,
        adf: AdfConfig {
            max_lag: Some(4),
            lag_selection: LagSelection::Bic,
        },
        parallel: false,
    };

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: DiagnosticsConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(de, cfg);
}

#[test]
fn partial_json_takes_defaults() {
    let cfg = DiagnosticsConfig::from_json_str(r#"{ "rolling_window": 14, "resample_frequency": "monthly" }"#)
        .expect("valid config");
    assert_eq!(cfg.rolling_window, 14);
    assert_eq!(cfg.resample_frequency, Frequency::Monthly);
    assert_eq!(cfg.decomposition_period, 365);
    assert_eq!(cfg.boundary_gaps, BoundaryGapPolicy::Error);
    assert!(cfg.parallel);
}

#[test]
fn window_outside_interactive_range_is_rejected() {
    for bad in [0usize, 6, 101] {
        let cfg = DiagnosticsConfig {
            rolling_window: bad,
            ..DiagnosticsConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DiagError::InvalidArg(_))), "window {bad}");
    }
    for ok in [7usize, 30, 100] {
        let cfg = DiagnosticsConfig {
            rolling_window: ok,
            ..DiagnosticsConfig::default()
        };
        assert!(cfg.validate().is_ok(), "window {ok}");
    }
}

#[test]
fn malformed_json_is_invalid_arg() {
    let err = DiagnosticsConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, DiagError::InvalidArg(_)));
    let err = DiagnosticsConfig::from_json_str(r#"{ "decomposition_period": 1 }"#).unwrap_err();
    assert!(matches!(err, DiagError::InvalidArg(_)));
}

#[test]
fn cache_config_roundtrip() {
    let cfg = CacheConfig {
        max_capacity: 4,
        ttl: Some(Duration::from_millis(1500)),
    };
    let json = serde_json::to_string(&cfg).expect("serialize cache config");
    let de: CacheConfig = serde_json::from_str(&json).expect("deserialize cache config");
    assert_eq!(de.max_capacity, 4);
    assert_eq!(de.ttl.map(|d| d.as_millis()), Some(1500));
}

#[test]
fn frequency_parses_aliases() {
    assert_eq!("W".parse::<Frequency>().unwrap(), Frequency::Weekly);
    assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
    assert_eq!(" d ".parse::<Frequency>().unwrap(), Frequency::Daily);
    assert!("Q".parse::<Frequency>().is_err());
    assert_eq!(serde_json::to_string(&Frequency::Daily).unwrap(), "\"daily\"");
    for f in Frequency::ALL {
        assert_eq!(f.code().parse::<Frequency>().unwrap(), f);
    }
}
