use chrono::{Days, NaiveDate};

use crate::clock::Clock;
use crate::config::Config;
use crate::core::leave::{commit_leave, total_days};
use crate::errors::{AppError, AppResult};
use crate::models::{LeaveKind, SickEntry};
use crate::storage::Stores;
use crate::utils::date::today;

/// Longest span a single sick entry may cover.
pub const MAX_SICK_SPAN_DAYS: u64 = 365;

/// Records sick leave as spans of consecutive calendar days.
///
/// Working-day flags play no part here: illness does not follow the schedule.
pub struct SickManager<'a> {
    cfg: &'a Config,
    stores: &'a mut Stores,
    clock: &'a dyn Clock,
}

impl<'a> SickManager<'a> {
    pub fn new(cfg: &'a Config, stores: &'a mut Stores, clock: &'a dyn Clock) -> Self {
        Self { cfg, stores, clock }
    }

    pub fn add_sick_days(
        &mut self,
        days: u32,
        description: Option<String>,
        start: Option<NaiveDate>,
    ) -> AppResult<SickEntry> {
        if days == 0 {
            return Err(AppError::validation("Number of days must be greater than 0"));
        }

        let now = self.clock.now();
        let start = start.unwrap_or_else(|| today(now, self.cfg.tz()));
        if u64::from(days) > MAX_SICK_SPAN_DAYS {
            return Err(AppError::validation(format!(
                "Sick leave is limited to {MAX_SICK_SPAN_DAYS} days per entry, got {days}"
            )));
        }
        let dates: Vec<NaiveDate> = (0..u64::from(days))
            .map(|i| start.checked_add_days(Days::new(i)))
            .collect::<Option<_>>()
            .ok_or_else(|| AppError::InvalidDate(format!("{start} + {days} days")))?;

        commit_leave(
            self.stores,
            LeaveKind::Sick,
            &dates,
            days,
            description,
            now,
            self.cfg.tz(),
        )
    }

    pub fn entries(&self) -> AppResult<Vec<SickEntry>> {
        let mut all = self.stores.sick.load_all()?;
        all.sort_by_key(|e| e.start_date);
        Ok(all)
    }

    pub fn total_sick_days(&self) -> AppResult<u32> {
        total_days(self.stores, LeaveKind::Sick)
    }
}
