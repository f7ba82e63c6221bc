use chrono::{NaiveDate, NaiveTime};

use crate::clock::Clock;
use crate::config::Config;
use crate::core::overlap::OverlapGuard;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryType, TimeEntry};
use crate::storage::Stores;
use crate::utils::date::{local_instant, today};
use crate::utils::ids::entry_id;

/// High-level business logic for manually recorded time entries.
pub struct EntryManager<'a> {
    cfg: &'a Config,
    stores: &'a mut Stores,
    clock: &'a dyn Clock,
}

fn validate_pause(pause: f64, gross_minutes: f64) -> AppResult<()> {
    if !pause.is_finite() || pause < 0.0 {
        return Err(AppError::validation(format!(
            "Pause must be a non-negative number of minutes, got {pause}"
        )));
    }
    if pause > gross_minutes {
        return Err(AppError::validation(format!(
            "Pause of {pause} min exceeds the {gross_minutes} min worked"
        )));
    }
    Ok(())
}

impl<'a> EntryManager<'a> {
    pub fn new(cfg: &'a Config, stores: &'a mut Stores, clock: &'a dyn Clock) -> Self {
        Self { cfg, stores, clock }
    }

    /// Record a finished block of work on `date` between two wall-clock
    /// times in the configured timezone.
    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        pause_minutes: f64,
        description: Option<String>,
    ) -> AppResult<TimeEntry> {
        let tz = self.cfg.tz();
        let now = self.clock.now();

        if date > today(now, tz) {
            return Err(AppError::validation(format!(
                "Cannot record time for a future date ({date})"
            )));
        }
        if end <= start {
            return Err(AppError::validation(format!(
                "End time {} must be after start time {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }

        let start_time = local_instant(date, start, tz)?;
        let end_time = local_instant(date, end, tz)?;
        let gross_minutes = (end_time - start_time).num_minutes() as f64;
        validate_pause(pause_minutes, gross_minutes)?;

        OverlapGuard::new(self.stores, self.cfg.tz()).check_new_time_entry(date)?;

        let entry = TimeEntry {
            id: entry_id(now),
            date,
            start_time,
            end_time: Some(end_time),
            pause_time: pause_minutes,
            entry_type: EntryType::Work,
            description: description.filter(|d| !d.trim().is_empty()),
        };
        self.stores.time.append(entry.clone())?;
        tracing::info!(%date, "time entry recorded");
        Ok(entry)
    }

    /// Replace the pause of the latest entry on `date`.
    pub fn amend_pause(&mut self, date: NaiveDate, pause_minutes: f64) -> AppResult<TimeEntry> {
        let mut all = self.stores.time.load_all()?;
        let idx = all
            .iter()
            .enumerate()
            .filter(|(_, e)| e.date == date)
            .max_by_key(|(_, e)| e.start_time)
            .map(|(i, _)| i)
            .ok_or(AppError::NoEntriesForDate(date))?;

        validate_pause(pause_minutes, all[idx].gross_minutes())?;
        all[idx].pause_time = pause_minutes;
        let updated = all[idx].clone();

        self.stores.time.rewrite_all(&all)?;
        tracing::info!(%date, pause_minutes, "pause amended");
        Ok(updated)
    }

    /// Remove every entry on `date`, returning how many were removed.
    pub fn delete_for_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        let all = self.stores.time.load_all()?;
        let before = all.len();
        let kept: Vec<TimeEntry> = all.into_iter().filter(|e| e.date != date).collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Err(AppError::NoEntriesForDate(date));
        }

        self.stores.time.rewrite_all(&kept)?;
        tracing::info!(%date, removed, "time entries deleted");
        Ok(removed)
    }

    /// Entries inside `range` (all when `None`), by start time.
    pub fn entries_between(&self, range: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<TimeEntry>> {
        let mut out: Vec<TimeEntry> = self
            .stores
            .time
            .load_all()?
            .into_iter()
            .filter(|e| range.is_none_or(|(s, end)| s <= e.date && e.date <= end))
            .collect();
        out.sort_by_key(|e| e.start_time);
        Ok(out)
    }
}
