use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Cell contents that mean "no value".
const MISSING_TOKENS: [&str; 4] = ["null", "NaN", "nan", "NA"];

/// Parse a timestamp cell.
///
/// Accepts RFC 3339 (offset converted to UTC), `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DD`; the naive forms are read as UTC.
pub fn timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(n) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(n.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|n| n.and_utc())
}

/// Parse a value cell: `Ok(None)` for missing markers and non-finite numbers.
pub fn value(raw: &str) -> Result<Option<f64>, String> {
    let s = raw.trim();
    if s.is_empty() || MISSING_TOKENS.contains(&s) {
        return Ok(None);
    }
    let v: f64 = s.parse().map_err(|_| format!("cannot parse '{s}' as number"))?;
    Ok(v.is_finite().then_some(v))
}
