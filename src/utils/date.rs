//! Calendar helpers: timezone-aware day bucketing, ISO checks, weeks and
//! period expressions.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{AppError, AppResult};

/// The calendar day `instant` falls on in `tz`.
pub fn day_in(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    day_in(now, tz)
}

/// Midnight of `date` in `tz`, as an instant.
///
/// Days starting inside a DST gap fall back to the earliest valid instant.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}

/// Wall-clock time on `date` in `tz`.
pub fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> AppResult<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(format!("{date} {time} does not exist in {tz}")))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a user supplied date, `today` when absent.
pub fn parse_date_or(s: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match s {
        Some(raw) => parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string())),
        None => Ok(today),
    }
}

/// True iff `s` names a real calendar date or datetime in a common ISO-8601
/// spelling.
pub fn is_valid_date_string(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }
    const NAIVE: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || parse_date(s).is_some()
}

/// Parse any spelling accepted by [`is_valid_date_string`]. Naive values are
/// read as UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(n) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(n.and_utc());
        }
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Monday and Sunday of the ISO week containing `date`.
pub fn iso_week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date - Days::new(offset);
    (monday, monday + Days::new(6))
}

/// Every date in `start..=end`; empty when `start > end`.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Inclusive range described by a period expression.
///
/// Supported: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and `start:end` ranges of
/// any of those. `all` yields `None` (no filtering).
pub fn parse_period(p: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let p = p.trim();
    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start, end)) = p.split_once(':') {
        let (s, _) = period_bounds(start)?;
        let (_, e) = period_bounds(end)?;
        if s > e {
            return Err(AppError::InvalidDate(format!(
                "Range start {s} is after range end {e}"
            )));
        }
        return Ok(Some((s, e)));
    }

    period_bounds(p).map(Some)
}

fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    let invalid = || AppError::InvalidDate(format!("Invalid period: {p}"));

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    Err(invalid())
}

/// Current month as a period, the default for listings.
pub fn current_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(today);
    (first, last)
}
