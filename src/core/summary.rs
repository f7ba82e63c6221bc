//! Weekly and overall balances over every entry type.
//!
//! A date claimed by several leave categories is credited once, under the
//! highest-precedence one: holiday, then sick, then vacation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::config::Config;
use crate::core::calculator::expected::{baseline_date, elapsed_weeks, expected_ms};
use crate::core::calculator::surplus::Balance;
use crate::core::leave::sum_days;
use crate::errors::AppResult;
use crate::models::{HolidayEntry, LeaveEntry, TimeEntry};
use crate::storage::Stores;
use crate::utils::date::{dates_between, iso_week_bounds, today};
use crate::utils::time::MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Holiday,
    Sick,
    Vacation,
    Work,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Holiday => "holiday",
            RowKind::Sick => "sick",
            RowKind::Vacation => "vacation",
            RowKind::Work => "work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub kind: RowKind,
    pub hours_ms: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub rows: Vec<SummaryRow>,
    pub balance: Balance,
}

impl WeeklySummary {
    pub fn total_ms(&self) -> i64 {
        self.balance.actual_ms
    }

    pub fn delta_ms(&self) -> i64 {
        self.balance.delta_ms()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallSummary {
    pub baseline: NaiveDate,
    pub elapsed_weeks: f64,
    pub worked_ms: i64,
    pub vacation_days: u32,
    pub sick_days: u32,
    /// Working-day holidays since the baseline, up to today.
    pub holiday_days: u32,
    /// Holidays that also fell inside a vacation or sick span; credited
    /// once, as holiday.
    pub overlapping_days: u32,
    pub daily_target_ms: i64,
    pub balance: Balance,
}

impl OverallSummary {
    pub fn expected_ms(&self) -> i64 {
        self.balance.target_ms
    }

    pub fn actual_ms(&self) -> i64 {
        self.balance.actual_ms
    }

    pub fn overtime_ms(&self) -> i64 {
        self.balance.delta_ms()
    }
}

/// Every entry type, loaded once per report.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub time_entries: Vec<TimeEntry>,
    pub vacations: Vec<LeaveEntry>,
    pub sick: Vec<LeaveEntry>,
    pub holidays: Vec<HolidayEntry>,
}

impl Ledger {
    pub fn load(stores: &Stores) -> AppResult<Self> {
        Ok(Self {
            time_entries: stores.time.load_all()?,
            vacations: stores.vacation.load_all()?,
            sick: stores.sick.load_all()?,
            holidays: stores.holidays.load_all()?,
        })
    }

    fn holiday_on(&self, date: NaiveDate) -> Option<&HolidayEntry> {
        self.holidays.iter().find(|h| h.date == date)
    }

    fn sick_on(&self, date: NaiveDate) -> Option<&LeaveEntry> {
        self.sick.iter().find(|e| e.covers(date))
    }

    fn vacation_on(&self, date: NaiveDate) -> Option<&LeaveEntry> {
        self.vacations.iter().find(|e| e.covers(date))
    }

    /// Leave classification of a date, holiday > sick > vacation.
    pub fn classify(&self, date: NaiveDate) -> Option<(RowKind, String)> {
        if let Some(h) = self.holiday_on(date) {
            return Some((RowKind::Holiday, h.name.clone()));
        }
        if let Some(s) = self.sick_on(date) {
            return Some((RowKind::Sick, s.description.clone()));
        }
        self.vacation_on(date)
            .map(|v| (RowKind::Vacation, v.description.clone()))
    }
}

/// Rows and balance of the ISO week containing `today`.
///
/// Working days get one leave row (daily target) when classified; any day
/// with tracked time gets a work row, weekends included.
pub fn weekly_summary(cfg: &Config, ledger: &Ledger, today: NaiveDate) -> WeeklySummary {
    let (week_start, week_end) = iso_week_bounds(today);
    let daily = cfg.daily_target_ms();

    let mut worked: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();
    for e in ledger
        .time_entries
        .iter()
        .filter(|e| week_start <= e.date && e.date <= week_end)
    {
        let slot = worked.entry(e.date).or_default();
        slot.0 += e.working_ms();
        slot.1 += 1;
    }

    let mut rows = Vec::new();
    for date in dates_between(week_start, week_end) {
        if cfg.is_working_day(date)
            && let Some((kind, label)) = ledger.classify(date)
        {
            rows.push(SummaryRow {
                date,
                kind,
                hours_ms: daily,
                label,
            });
        }
        if let Some((ms, count)) = worked.get(&date) {
            let unit = if *count == 1 { "entry" } else { "entries" };
            rows.push(SummaryRow {
                date,
                kind: RowKind::Work,
                hours_ms: *ms,
                label: format!("{count} {unit}"),
            });
        }
    }

    let total: i64 = rows.iter().map(|r| r.hours_ms).sum();
    WeeklySummary {
        week_start,
        week_end,
        rows,
        balance: Balance::new(total, cfg.weekly_target_ms()),
    }
}

/// Balance since the employment baseline.
pub fn overall_summary(cfg: &Config, ledger: &Ledger, now: DateTime<Utc>) -> OverallSummary {
    let tz = cfg.tz();
    let today = today(now, tz);
    let baseline = baseline_date(cfg, &ledger.time_entries, today);
    let weeks = elapsed_weeks(baseline, now, tz);
    let daily = cfg.daily_target_ms();

    let worked_ms: i64 = ledger
        .time_entries
        .iter()
        .filter(|e| e.end_time.is_some())
        .map(TimeEntry::working_ms)
        .sum();
    let vacation_days = sum_days(&ledger.vacations);
    let sick_days = sum_days(&ledger.sick);

    let holiday_dates: BTreeSet<NaiveDate> = ledger
        .holidays
        .iter()
        .map(|h| h.date)
        .filter(|d| *d >= baseline && *d <= today && cfg.is_working_day(*d))
        .collect();

    // Leave days that coincide with a counted holiday move to the holiday
    // column so the date is not credited twice.
    let mut vacation_credit = vacation_days;
    let mut sick_credit = sick_days;
    let mut overlapping = 0u32;
    for d in &holiday_dates {
        if ledger.sick_on(*d).is_some() {
            sick_credit = sick_credit.saturating_sub(1);
            overlapping += 1;
        } else if ledger.vacation_on(*d).is_some() {
            vacation_credit = vacation_credit.saturating_sub(1);
            overlapping += 1;
        }
    }
    let holiday_days = holiday_dates.len() as u32;

    let leave_days = i64::from(vacation_credit) + i64::from(sick_credit) + i64::from(holiday_days);
    let actual = worked_ms + leave_days * daily;

    OverallSummary {
        baseline,
        elapsed_weeks: weeks,
        worked_ms,
        vacation_days,
        sick_days,
        holiday_days,
        overlapping_days: overlapping,
        daily_target_ms: daily,
        balance: Balance::new(actual, expected_ms(weeks, cfg)),
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    kind: &'a str,
    hours: f64,
    label: &'a str,
}

/// Weekly rows as CSV (`date,kind,hours,label`), hours to two decimals.
pub fn write_weekly_csv<W: Write>(summary: &WeeklySummary, out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in &summary.rows {
        let hours = (row.hours_ms as f64 / MS_PER_HOUR as f64 * 100.0).round() / 100.0;
        wtr.serialize(CsvRow {
            date: row.date,
            kind: row.kind.as_str(),
            hours,
            label: &row.label,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
