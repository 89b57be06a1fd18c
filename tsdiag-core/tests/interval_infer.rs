use chrono::DateTime;
use proptest::prelude::*;
use tsdiag_core::estimate_step_seconds;
use tsdiag_core::{Observation, TimeSeries};

fn at(secs: &[i64]) -> TimeSeries {
    TimeSeries::new(
        secs.iter()
            .map(|&s| Observation::new(DateTime::from_timestamp(s, 0).unwrap(), 1.0))
            .collect(),
    )
    .unwrap()
}

#[test]
fn too_short_has_no_step() {
    assert_eq!(estimate_step_seconds(&at(&[])), None);
    assert_eq!(estimate_step_seconds(&at(&[10])), None);
}

#[test]
fn weekday_closes_keep_a_daily_step() {
    // Mon..Fri, weekend, Mon..Fri
    let days = [0, 1, 2, 3, 4, 7, 8, 9, 10, 11];
    let s = at(&days.map(|d| d * 86_400));
    assert_eq!(estimate_step_seconds(&s), Some(86_400));
}

#[test]
fn hourly_bars_have_an_hourly_step() {
    let secs: Vec<i64> = (0..24).map(|h| h * 3600).collect();
    let s = at(&secs);
    assert_eq!(estimate_step_seconds(&s), Some(3600));
}

#[test]
fn tie_falls_back_to_lower_median() {
    // deltas 60, 60, 120, 120, 300 -> tie between 60 and 120, lower median 120
    let s = at(&[0, 60, 120, 240, 360, 660]);
    assert_eq!(estimate_step_seconds(&s), Some(120));
}

#[test]
fn unique_mode_wins_over_median() {
    // deltas 10, 10, 500, 700, 900 -> mode 10, median 500
    let s = at(&[0, 10, 20, 520, 1220, 2120]);
    assert_eq!(estimate_step_seconds(&s), Some(10));
}

proptest! {
    #[test]
    fn regular_grid_recovers_its_step(step_idx in 0usize..4, n in 2usize..100) {
        let steps = [60i64, 300, 3600, 86_400];
        let step = steps[step_idx];
        let secs: Vec<i64> = (0..n as i64).map(|i| i * step).collect();
        prop_assert_eq!(estimate_step_seconds(&at(&secs)), Some(step));
    }

    #[test]
    fn estimate_is_an_observed_delta(secs in prop::collection::btree_set(0i64..10_000_000, 2..60)) {
        let secs: Vec<i64> = secs.into_iter().collect();
        let deltas: Vec<i64> = secs.windows(2).map(|w| w[1] - w[0]).collect();
        let est = estimate_step_seconds(&at(&secs)).unwrap();
        prop_assert!(deltas.contains(&est));
    }
}
