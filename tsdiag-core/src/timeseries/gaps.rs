use chrono::{DateTime, TimeDelta, Utc};
use tsdiag_types::{DiagError, Observation, TimeSeries};

/// Outcome of interior gap filling.
///
/// `series` has every interior gap interpolated; the leading and trailing
/// missing runs, which have no bounding value on one side, are left missing
/// and counted in `leading` / `trailing`.
#[derive(Debug, Clone, PartialEq)]
pub struct GapFill {
    /// The filled series (boundary runs still missing).
    pub series: TimeSeries,
    /// Number of values filled by interpolation.
    pub interpolated: usize,
    /// Length of the leading missing run.
    pub leading: usize,
    /// Length of the trailing missing run.
    pub trailing: usize,
}

impl GapFill {
    /// Whether a leading or trailing missing run remains.
    #[must_use]
    pub const fn has_boundary_gaps(&self) -> bool {
        self.leading > 0 || self.trailing > 0
    }

    /// The filled series, or `UnfillableBoundaryGap` if a boundary run remains.
    ///
    /// # Errors
    /// `UnfillableBoundaryGap` with both run lengths.
    pub fn into_complete(self) -> Result<TimeSeries, DiagError> {
        if self.has_boundary_gaps() {
            return Err(DiagError::UnfillableBoundaryGap {
                leading: self.leading,
                trailing: self.trailing,
            });
        }
        Ok(self.series)
    }

    /// Drop the unfilled boundary runs and return what is left.
    #[must_use]
    pub fn trim_boundaries(self) -> TimeSeries {
        let end = self.series.len().saturating_sub(self.trailing);
        self.series.slice(self.leading, end)
    }
}

/// Elapsed nanoseconds from `a` to `b`, falling back to millisecond
/// resolution for spans beyond the `i64` nanosecond range.
fn elapsed_nanos(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let d = b - a;
    d.num_nanoseconds()
        .map_or_else(|| d.num_milliseconds() as f64 * 1e6, |ns| ns as f64)
}

/// Fill interior gaps by time-weighted linear interpolation.
///
/// A missing value at `t` between known values `(t0, v0)` and `(t1, v1)` becomes
/// `v0 + (v1 - v0) * (t - t0) / (t1 - t0)`. Weights come from elapsed time, not
/// from positions, so irregular spacing is respected.
///
/// # Errors
/// `Data` if the filled values cannot form a valid series.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tsdiag::gaps::fill_interior", skip(series), fields(len = series.len()))
)]
pub fn fill_interior(series: &TimeSeries) -> Result<GapFill, DiagError> {
    let obs = series.as_slice();
    let known: Vec<usize> = obs
        .iter()
        .enumerate()
        .filter(|(_, o)| o.value.is_some())
        .map(|(i, _)| i)
        .collect();

    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return Ok(GapFill {
            series: series.clone(),
            interpolated: 0,
            leading: obs.len(),
            trailing: 0,
        });
    };

    let mut values: Vec<Option<f64>> = obs.iter().map(|o| o.value).collect();
    let mut interpolated = 0usize;
    for pair in known.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b == a + 1 {
            continue;
        }
        let (t0, t1) = (obs[a].ts, obs[b].ts);
        let (Some(v0), Some(v1)) = (obs[a].value, obs[b].value) else {
            continue;
        };
        let span = elapsed_nanos(t0, t1);
        for k in (a + 1)..b {
            let frac = elapsed_nanos(t0, obs[k].ts) / span;
            values[k] = Some((v1 - v0).mul_add(frac, v0));
            interpolated += 1;
        }
    }

    let leading = first;
    let trailing = obs.len() - 1 - last;
    #[cfg(feature = "tracing")]
    if leading > 0 || trailing > 0 {
        tracing::warn!(leading, trailing, "missing values at series boundary left unfilled");
    }

    Ok(GapFill {
        series: series.with_values(values)?,
        interpolated,
        leading,
        trailing,
    })
}

/// Fill every missing value by time-weighted linear interpolation.
///
/// A series with no missing values is returned unchanged.
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use tsdiag_core::{fill, TimeSeries};
///
/// let t0 = DateTime::from_timestamp(0, 0).unwrap();
/// let s = TimeSeries::from_options(t0, TimeDelta::days(1), [Some(1.0), None, Some(3.0)]).unwrap();
/// let filled = fill(&s).unwrap();
/// assert_eq!(filled.get(1).unwrap().value, Some(2.0));
/// ```
///
/// # Errors
/// `UnfillableBoundaryGap` if the series starts or ends with missing values.
/// Use [`fill_interior`] to keep the interior result anyway.
pub fn fill(series: &TimeSeries) -> Result<TimeSeries, DiagError> {
    fill_interior(series)?.into_complete()
}

/// Insert explicitly missing observations where expected timestamps are absent.
///
/// Expected timestamps lie on the grid `t0 + k·step`, where `t0` is the first
/// timestamp. Each observation claims its nearest grid slot; every unclaimed
/// slot between two adjacent observations is inserted as missing. A gap of
/// several steps gains its missing slots, while timing jitter of less than half
/// a step inserts nothing. Existing observations are kept as they are.
///
/// # Errors
/// `InvalidArg` if `step_seconds` is not positive or a grid slot falls outside
/// the representable time range.
pub fn regularize(series: &TimeSeries, step_seconds: i64) -> Result<TimeSeries, DiagError> {
    if step_seconds <= 0 {
        return Err(DiagError::InvalidArg(format!(
            "step must be positive, got {step_seconds}s"
        )));
    }
    let Some(step_ms) = step_seconds.checked_mul(1000) else {
        return Err(DiagError::InvalidArg(format!("step {step_seconds}s is too large")));
    };
    let obs = series.as_slice();
    let Some(t0) = obs.first().map(|o| o.ts) else {
        return Ok(series.clone());
    };

    let slot_of =
        |ts: DateTime<Utc>| ((ts - t0).num_milliseconds() + step_ms / 2).div_euclid(step_ms);
    let slot_ts = |k: i64| {
        k.checked_mul(step_ms)
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|d| t0.checked_add_signed(d))
            .ok_or_else(|| DiagError::InvalidArg(format!("grid slot {k} is out of range")))
    };

    let mut out: Vec<Observation> = Vec::with_capacity(obs.len());
    for pair in obs.windows(2) {
        out.push(pair[0]);
        for k in slot_of(pair[0].ts) + 1..slot_of(pair[1].ts) {
            out.push(Observation::missing(slot_ts(k)?));
        }
    }
    out.extend(obs.last().copied());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        inserted = out.len() - obs.len(),
        step_seconds,
        "regularized series"
    );
    TimeSeries::new(out)
}
