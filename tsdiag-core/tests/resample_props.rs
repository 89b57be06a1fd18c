use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};
use proptest::prelude::*;
use tsdiag_core::{
    Frequency, Observation, TimeSeries, bucket_label, bucket_start, next_bucket, resample,
};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

#[test]
fn ten_days_over_three_weeks_give_three_buckets() {
    // Saturday 2020-01-04 .. Monday 2020-01-13
    let s = TimeSeries::from_values(
        date(2020, 1, 4),
        TimeDelta::days(1),
        (1..=10).map(f64::from),
    )
    .unwrap();
    let weekly = resample(&s, Frequency::Weekly).unwrap();
    let ts: Vec<_> = weekly.timestamps().collect();
    assert_eq!(
        ts,
        vec![date(2020, 1, 5), date(2020, 1, 12), date(2020, 1, 19)]
    );
    let values: Vec<_> = weekly.values().collect();
    assert_eq!(values, vec![Some(1.5), Some(6.0), Some(10.0)]);
    assert!(weekly.timestamps().all(|t| t.weekday() == Weekday::Sun));
}

#[test]
fn empty_month_is_missing_not_zero() {
    let s = TimeSeries::new(vec![
        Observation::new(date(2021, 1, 15), 1.0),
        Observation::new(date(2021, 1, 20), 3.0),
        Observation::new(date(2021, 3, 3), 5.0),
    ])
    .unwrap();
    let monthly = resample(&s, Frequency::Monthly).unwrap();
    let ts: Vec<_> = monthly.timestamps().collect();
    assert_eq!(ts, vec![date(2021, 1, 31), date(2021, 2, 28), date(2021, 3, 31)]);
    let values: Vec<_> = monthly.values().collect();
    assert_eq!(values, vec![Some(2.0), None, Some(5.0)]);
}

#[test]
fn labels_close_each_bucket() {
    // Monday 2017-01-02
    let s = TimeSeries::from_values(date(2017, 1, 2), TimeDelta::days(1), [1.0, 2.0]).unwrap();
    let weekly = resample(&s, Frequency::Weekly).unwrap();
    assert_eq!(weekly.first_ts(), Some(date(2017, 1, 8)));
    let monthly = resample(&s, Frequency::Monthly).unwrap();
    assert_eq!(monthly.first_ts(), Some(date(2017, 1, 31)));
    let daily = resample(&s, Frequency::Daily).unwrap();
    assert_eq!(daily.first_ts(), Some(date(2017, 1, 2)));

    let leap = TimeSeries::from_values(date(2020, 2, 10), TimeDelta::days(1), [1.0]).unwrap();
    let monthly = resample(&leap, Frequency::Monthly).unwrap();
    assert_eq!(monthly.first_ts(), Some(date(2020, 2, 29)));
}

#[test]
fn december_rolls_into_next_year() {
    let s = TimeSeries::new(vec![
        Observation::new(date(2021, 12, 31), 1.0),
        Observation::new(date(2022, 1, 1), 2.0),
    ])
    .unwrap();
    let monthly = resample(&s, Frequency::Monthly).unwrap();
    let ts: Vec<_> = monthly.timestamps().collect();
    assert_eq!(ts, vec![date(2021, 12, 31), date(2022, 1, 31)]);
}

#[test]
fn missing_inputs_are_skipped_in_the_mean() {
    let s = TimeSeries::from_options(
        date(2020, 1, 6),
        TimeDelta::days(1),
        [Some(2.0), None, Some(4.0), None, None, None, None],
    )
    .unwrap();
    let weekly = resample(&s, Frequency::Weekly).unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly.get(0).unwrap().value, Some(3.0));
}

#[test]
fn hourly_to_daily() {
    let s = TimeSeries::from_values(
        date(2020, 1, 1),
        TimeDelta::hours(1),
        (0..48).map(f64::from),
    )
    .unwrap();
    let daily = resample(&s, Frequency::Daily).unwrap();
    let values: Vec<_> = daily.values().collect();
    assert_eq!(values, vec![Some(11.5), Some(35.5)]);
}

#[test]
fn empty_series_resamples_to_empty() {
    for freq in Frequency::ALL {
        assert!(resample(&TimeSeries::default(), freq).unwrap().is_empty());
    }
}

fn arb_series() -> impl Strategy<Value = TimeSeries> {
    prop::collection::btree_map(
        0i64..(3 * 365 * 24),
        prop::option::weighted(0.9, -1000.0f64..1000.0),
        1..200,
    )
    .prop_map(|m| {
        let base = date(2019, 6, 1);
        let obs = m
            .into_iter()
            .map(|(h, value)| Observation {
                ts: base + TimeDelta::hours(h),
                value,
            })
            .collect();
        TimeSeries::new(obs).unwrap()
    })
}

fn arb_freq() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::ALL.to_vec())
}

proptest! {
    #[test]
    fn buckets_are_contiguous_and_hold_bucket_means(s in arb_series(), freq in arb_freq()) {
        let out = resample(&s, freq).unwrap();

        let first = bucket_start(freq, s.first_ts().unwrap()).unwrap();
        let last = bucket_start(freq, s.last_ts().unwrap()).unwrap();
        let mut expected_ts = vec![first];
        while *expected_ts.last().unwrap() < last {
            let b = next_bucket(freq, *expected_ts.last().unwrap()).unwrap();
            expected_ts.push(b);
        }
        let got_ts: Vec<_> = out.timestamps().collect();
        let labels: Vec<_> = expected_ts
            .iter()
            .map(|&b| bucket_label(freq, b).unwrap())
            .collect();
        prop_assert_eq!(got_ts, labels);

        for (o, start) in out.iter().zip(&expected_ts) {
            let members: Vec<f64> = s
                .iter()
                .filter(|x| bucket_start(freq, x.ts) == Some(*start))
                .filter_map(|x| x.value)
                .collect();
            match o.value {
                None => prop_assert!(members.is_empty()),
                Some(v) => {
                    let mean = members.iter().sum::<f64>() / members.len() as f64;
                    prop_assert!((v - mean).abs() <= 1e-9 * mean.abs().max(1.0));
                }
            }
        }
    }
}
