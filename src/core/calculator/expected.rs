use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::Config;
use crate::models::TimeEntry;
use crate::utils::date::start_of_day;
use crate::utils::time::MS_PER_WEEK;

/// Start of overtime accounting: the configured employment start, else the
/// first tracked day, else today.
pub fn baseline_date(cfg: &Config, entries: &[TimeEntry], today: NaiveDate) -> NaiveDate {
    cfg.start_date
        .or_else(|| entries.iter().map(|e| e.date).min())
        .unwrap_or(today)
}

/// Fractional number of 7-day periods between the start of `baseline` (in
/// `tz`) and `now`. A baseline in the future counts as zero weeks.
pub fn elapsed_weeks(baseline: NaiveDate, now: DateTime<Utc>, tz: Tz) -> f64 {
    let ms = (now - start_of_day(baseline, tz)).num_milliseconds().max(0);
    ms as f64 / MS_PER_WEEK as f64
}

/// Expected = elapsed weeks × weekly hours.
pub fn expected_ms(weeks: f64, cfg: &Config) -> i64 {
    (weeks * cfg.weekly_target_ms() as f64).round() as i64
}
