use chrono::{Days, NaiveDate};

use crate::clock::Clock;
use crate::config::Config;
use crate::core::leave::{commit_leave, total_days};
use crate::errors::{AppError, AppResult};
use crate::models::{LeaveKind, VacationEntry};
use crate::storage::Stores;
use crate::utils::date::{dates_between, today};

/// How far a non-working start date may be pushed forward.
pub const START_LOOKAHEAD_DAYS: u64 = 14;
/// How far the working-day walk may reach before giving up.
pub const COLLECT_CAP_DAYS: u64 = 365;

/// Records vacation as spans of working days.
pub struct VacationManager<'a> {
    cfg: &'a Config,
    stores: &'a mut Stores,
    clock: &'a dyn Clock,
}

impl<'a> VacationManager<'a> {
    pub fn new(cfg: &'a Config, stores: &'a mut Stores, clock: &'a dyn Clock) -> Self {
        Self { cfg, stores, clock }
    }

    /// First working day on or after `from`, looking at most
    /// [`START_LOOKAHEAD_DAYS`] ahead.
    pub fn first_working_day(&self, from: NaiveDate) -> AppResult<NaiveDate> {
        (0..START_LOOKAHEAD_DAYS)
            .filter_map(|i| from.checked_add_days(Days::new(i)))
            .find(|d| self.cfg.is_working_day(*d))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "No working day found within {START_LOOKAHEAD_DAYS} days of {from}"
                ))
            })
    }

    /// The next `days` working days starting at `from` (inclusive).
    pub fn collect_working_days(&self, from: NaiveDate, days: u32) -> AppResult<Vec<NaiveDate>> {
        let wanted = days as usize;
        let collected: Vec<NaiveDate> = (0..COLLECT_CAP_DAYS)
            .filter_map(|i| from.checked_add_days(Days::new(i)))
            .filter(|d| self.cfg.is_working_day(*d))
            .take(wanted)
            .collect();

        if collected.len() < wanted {
            return Err(AppError::validation(format!(
                "Could not find {days} working days within {COLLECT_CAP_DAYS} days of {from}"
            )));
        }
        Ok(collected)
    }

    pub fn working_days_in(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        dates_between(start, end)
            .into_iter()
            .filter(|d| self.cfg.is_working_day(*d))
            .collect()
    }

    /// Book `days` working days of vacation starting at `start` (today when
    /// absent). A non-working start moves to the next working day.
    pub fn add_vacation(
        &mut self,
        days: u32,
        start: Option<NaiveDate>,
        description: Option<String>,
    ) -> AppResult<VacationEntry> {
        if days == 0 {
            return Err(AppError::validation("Number of days must be greater than 0"));
        }

        let now = self.clock.now();
        let requested = start.unwrap_or_else(|| today(now, self.cfg.tz()));
        let first = self.first_working_day(requested)?;
        if first != requested {
            tracing::debug!(%requested, %first, "vacation start moved to a working day");
        }

        let dates = self.collect_working_days(first, days)?;
        commit_leave(
            self.stores,
            LeaveKind::Vacation,
            &dates,
            days,
            description,
            now,
            self.cfg.tz(),
        )
    }

    /// Book every working day of `start..=end`.
    ///
    /// Returns `Ok(None)` when the range holds no working day; nothing is
    /// written in that case.
    pub fn add_vacation_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        description: Option<String>,
    ) -> AppResult<Option<VacationEntry>> {
        if start > end {
            return Err(AppError::validation(format!(
                "Start date {start} is after end date {end}"
            )));
        }

        let dates = self.working_days_in(start, end);
        if dates.is_empty() {
            tracing::warn!(%start, %end, "no working days in vacation range");
            return Ok(None);
        }

        let days = dates.len() as u32;
        commit_leave(
            self.stores,
            LeaveKind::Vacation,
            &dates,
            days,
            description,
            self.clock.now(),
            self.cfg.tz(),
        )
        .map(Some)
    }

    pub fn entries(&self) -> AppResult<Vec<VacationEntry>> {
        let mut all = self.stores.vacation.load_all()?;
        all.sort_by_key(|e| e.start_date);
        Ok(all)
    }

    pub fn total_vacation_days(&self) -> AppResult<u32> {
        total_days(self.stores, LeaveKind::Vacation)
    }

    pub fn remaining_vacation_days(&self) -> AppResult<f64> {
        let used = f64::from(self.total_vacation_days()?);
        Ok((self.cfg.vacation_days_per_year - used).max(0.0))
    }
}
