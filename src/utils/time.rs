//! Time utilities: parsing HH:MM, working-time arithmetic, live session
//! elapsed/paused computations.

use chrono::{DateTime, NaiveTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::errors::{AppError, AppResult};
use crate::models::WorkSession;
use crate::utils::date::parse_instant;

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_WEEK: i64 = 7 * 24 * MS_PER_HOUR;

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):?(\d{2})$").expect("static regex"))
}

/// Accepts `8:05`, `08:05` and `0805`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let caps = clock_re().captures(t.trim())?;
    let h = caps[1].parse().ok()?;
    let m = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

pub fn parse_required_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// `max(0, (end - start) - pause)`; 0 whenever a timestamp is missing.
///
/// Negative or NaN pauses count as no pause.
pub fn working_time_ms(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    pause_minutes: f64,
) -> i64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    let gross = (end - start).num_milliseconds();
    let pause = if pause_minutes.is_finite() && pause_minutes > 0.0 {
        (pause_minutes * MS_PER_MINUTE as f64).round() as i64
    } else {
        0
    };
    gross.saturating_sub(pause).max(0)
}

/// [`working_time_ms`] over raw strings, as found in hand-edited stores.
pub fn working_time_ms_str(start: &str, end: &str, pause_minutes: f64) -> i64 {
    working_time_ms(parse_instant(start), parse_instant(end), pause_minutes)
}

/// Milliseconds of the open pause at `now`.
///
/// A pause start lying in the future contributes nothing.
fn open_pause_ms(session: &WorkSession, now: DateTime<Utc>) -> i64 {
    match (session.is_paused, session.pause_start_time) {
        (true, Some(since)) if since <= now => (now - since).num_milliseconds(),
        _ => 0,
    }
}

/// Closed pauses plus the currently open one.
pub fn current_paused_ms(session: &WorkSession, now: DateTime<Utc>) -> i64 {
    session.paused_time_ms.max(0) + open_pause_ms(session, now)
}

/// Live net elapsed time of a session, never negative.
pub fn elapsed_ms(session: &WorkSession, now: DateTime<Utc>) -> i64 {
    let gross = (now - session.start_time).num_milliseconds();
    (gross - current_paused_ms(session, now)).max(0)
}

pub fn ms_to_minutes(ms: i64) -> f64 {
    ms as f64 / MS_PER_MINUTE as f64
}
