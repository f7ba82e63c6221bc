//! Pieces shared by the vacation and sick-leave managers.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::core::overlap::OverlapGuard;
use crate::errors::{AppError, AppResult};
use crate::models::{LeaveEntry, LeaveKind};
use crate::storage::Stores;
use crate::utils::ids::entry_id;

/// Parse a whole, positive number of days.
///
/// `"3"` is accepted; `"0"`, `"-1"`, `"2.5"` and `"abc"` are not.
pub fn parse_day_count(raw: &str) -> AppResult<u32> {
    let raw = raw.trim();
    match raw.parse::<u32>() {
        Ok(0) => Err(AppError::validation("Number of days must be greater than 0")),
        Ok(n) => Ok(n),
        Err(_) => match raw.parse::<f64>() {
            Ok(v) if v <= 0.0 => Err(AppError::validation("Number of days must be greater than 0")),
            Ok(v) if !v.is_finite() || v.fract() != 0.0 => Err(AppError::validation(format!(
                "Number of days must be a whole number, got {raw}"
            ))),
            Ok(v) if v <= f64::from(u32::MAX) => Ok(v as u32),
            _ => Err(AppError::validation(format!("Not a number of days: {raw}"))),
        },
    }
}

/// Validate `dates` against every other claim and persist one entry spanning
/// them. Nothing is written when a check fails.
pub(crate) fn commit_leave(
    stores: &mut Stores,
    kind: LeaveKind,
    dates: &[NaiveDate],
    days: u32,
    description: Option<String>,
    now: DateTime<Utc>,
    tz: Tz,
) -> AppResult<LeaveEntry> {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Err(AppError::validation(format!("No {kind} dates to record")));
    };

    OverlapGuard::new(stores, tz).check_new_leave(dates, kind)?;

    let entry = LeaveEntry {
        id: entry_id(now),
        start_date: first,
        end_date: last,
        days,
        description: description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| kind.default_description(days)),
    };
    stores.leave_mut(kind).append(entry.clone())?;

    tracing::info!(%kind, start = %first, end = %last, days, "leave recorded");
    Ok(entry)
}

/// Sum of the `days` column. Saturates instead of overflowing on
/// hand-edited stores.
pub fn sum_days(entries: &[LeaveEntry]) -> u32 {
    entries.iter().fold(0u32, |acc, e| acc.saturating_add(e.days))
}

pub(crate) fn total_days(stores: &Stores, kind: LeaveKind) -> AppResult<u32> {
    Ok(sum_days(&stores.leave(kind).load_all()?))
}
