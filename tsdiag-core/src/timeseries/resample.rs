use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use tsdiag_types::{DiagError, Frequency, Observation, TimeSeries};

const DAY: i64 = 86_400;

// 1970-01-01 was a Thursday; shift so weeks start on Monday.
const fn week_start_day(day: i64) -> i64 {
    day - ((day + 3).rem_euclid(7))
}

fn day_start(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let day = ts.timestamp().div_euclid(DAY);
    DateTime::from_timestamp(day * DAY, 0)
}

fn week_start(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let day = ts.timestamp().div_euclid(DAY);
    DateTime::from_timestamp(week_start_day(day) * DAY, 0)
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|n| n.and_utc())
}

/// Start of the calendar bucket containing `ts`.
///
/// - `Daily`: 00:00 UTC of the same day.
/// - `Weekly`: Monday 00:00 UTC of the ISO week.
/// - `Monthly`: the 1st of the month, 00:00 UTC.
#[must_use]
pub fn bucket_start(freq: Frequency, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match freq {
        Frequency::Daily => day_start(ts),
        Frequency::Weekly => week_start(ts),
        Frequency::Monthly => month_start(ts.year(), ts.month()),
    }
}

/// Timestamp that labels the bucket starting at `start`: the closing day of
/// the bucket at 00:00 UTC.
///
/// - `Daily`: the day itself.
/// - `Weekly`: the Sunday ending the ISO week.
/// - `Monthly`: the last day of the month.
#[must_use]
pub fn bucket_label(freq: Frequency, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match freq {
        Frequency::Daily => Some(start),
        Frequency::Weekly | Frequency::Monthly => {
            next_bucket(freq, start)?.checked_sub_signed(TimeDelta::days(1))
        }
    }
}

/// Start of the bucket following the one that starts at `start`.
#[must_use]
pub fn next_bucket(freq: Frequency, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match freq {
        Frequency::Daily => start.checked_add_signed(TimeDelta::days(1)),
        Frequency::Weekly => start.checked_add_signed(TimeDelta::days(7)),
        Frequency::Monthly => {
            let (y, m) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            month_start(y, m)
        }
    }
}

fn out_of_range(ts: DateTime<Utc>) -> DiagError {
    DiagError::InvalidArg(format!("timestamp {ts} has no representable bucket"))
}

fn bucket_mean(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Group a sorted series by a monotone bucket function and average each bucket.
///
/// Every bucket between the first and the last observed one is emitted, in
/// order, under the timestamp `label` gives its start; a bucket with no
/// defined value is missing.
fn resample_by<F, N, L>(
    series: &TimeSeries,
    bucket_of: F,
    next: N,
    label: L,
) -> Result<TimeSeries, DiagError>
where
    F: Fn(DateTime<Utc>) -> Option<DateTime<Utc>>,
    N: Fn(DateTime<Utc>) -> Option<DateTime<Utc>>,
    L: Fn(DateTime<Utc>) -> Option<DateTime<Utc>>,
{
    let Some(first) = series.get(0) else {
        return Ok(TimeSeries::default());
    };

    let mut out: Vec<Observation> = Vec::new();
    let mut cur = bucket_of(first.ts).ok_or_else(|| out_of_range(first.ts))?;
    let mut sum = 0.0_f64;
    let mut count = 0_usize;

    for o in series {
        let bucket = bucket_of(o.ts).ok_or_else(|| out_of_range(o.ts))?;
        while cur < bucket {
            out.push(Observation {
                ts: label(cur).ok_or_else(|| out_of_range(cur))?,
                value: bucket_mean(sum, count),
            });
            sum = 0.0;
            count = 0;
            cur = next(cur).ok_or_else(|| out_of_range(cur))?;
        }
        if cur != bucket {
            return Err(DiagError::Data(format!(
                "bucket {bucket} is not aligned with bucket sequence at {cur}"
            )));
        }
        if let Some(v) = o.value {
            sum += v;
            count += 1;
        }
    }
    out.push(Observation {
        ts: label(cur).ok_or_else(|| out_of_range(cur))?,
        value: bucket_mean(sum, count),
    });

    TimeSeries::new(out)
}

/// Aggregate a series to a coarser calendar frequency by arithmetic mean.
///
/// - Buckets are grouped by [`bucket_start`] and labelled by their closing day
///   (see [`bucket_label`]): the Sunday of each week, the last day of each
///   month. Labels are strictly increasing.
/// - Each bucket's value is the mean of the defined input values inside it;
///   missing inputs are skipped, and a bucket with no defined value is missing
///   rather than zero.
/// - The output spans every bucket from the first to the last observation.
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use tsdiag_core::{resample, Frequency, TimeSeries};
///
/// // Thursday 1970-01-01 .. Tuesday 1970-01-06: two ISO weeks.
/// let t0 = DateTime::from_timestamp(0, 0).unwrap();
/// let s = TimeSeries::from_values(t0, TimeDelta::days(1), [1.0, 2.0, 3.0, 4.0, 10.0, 20.0]).unwrap();
/// let weekly = resample(&s, Frequency::Weekly).unwrap();
/// let values: Vec<_> = weekly.values().collect();
/// assert_eq!(values, vec![Some(2.5), Some(15.0)]);
/// // Sunday 1970-01-04 closes the first week.
/// assert_eq!(weekly.first_ts(), DateTime::from_timestamp(3 * 86_400, 0));
/// ```
///
/// # Errors
/// `InvalidArg` if a timestamp has no representable bucket.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tsdiag::resample", skip_all, fields(len = series.len(), freq = %freq))
)]
pub fn resample(series: &TimeSeries, freq: Frequency) -> Result<TimeSeries, DiagError> {
    resample_by(
        series,
        move |ts| bucket_start(freq, ts),
        move |b| next_bucket(freq, b),
        move |b| bucket_label(freq, b),
    )
}
