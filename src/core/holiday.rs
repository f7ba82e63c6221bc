use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::holidays::{BuiltinCalendar, HolidaySource, RawHoliday};
use crate::models::HolidayEntry;
use crate::storage::Stores;
use crate::ui::prompt::Prompter;
use crate::utils::date::{parse_date, parse_instant};
use crate::utils::ids::holiday_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Holidays for the tuple were already present and `force` was off.
    AlreadyInitialized { existing: usize },
    /// Fresh import; `replaced` counts entries removed first (`force`).
    Imported { count: usize, replaced: usize },
}

/// Country and region for an import: explicit values first, then the
/// configured defaults, then the prompter.
pub fn resolve_region(
    cfg: &Config,
    country: Option<&str>,
    region: Option<&str>,
    prompter: &mut dyn Prompter,
) -> AppResult<(String, String)> {
    let country = match country.or(cfg.holiday_country.as_deref()) {
        Some(c) => c.to_string(),
        None => prompter.ask("Country code (DE, GB):")?,
    };
    let country = country.trim().to_uppercase();
    if country.is_empty() {
        return Err(AppError::validation("A country code is required"));
    }

    let region = match region.or(cfg.holiday_region.as_deref()) {
        Some(r) => r.to_string(),
        None => {
            let known = BuiltinCalendar::regions(&country);
            let hint = if known.is_empty() {
                String::new()
            } else {
                format!(" ({})", known.join(", "))
            };
            prompter.ask(&format!("Region{hint}, empty for country-wide only:"))?
        }
    };
    Ok((country, region.trim().to_uppercase()))
}

pub struct HolidayManager<'a> {
    cfg: &'a Config,
    stores: &'a mut Stores,
}

/// Calendar date of a raw definition, ignoring any time part.
fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(parse_date)
        .or_else(|| parse_instant(raw).map(|dt| dt.date_naive()))
}

impl<'a> HolidayManager<'a> {
    pub fn new(cfg: &'a Config, stores: &'a mut Stores) -> Self {
        Self { cfg, stores }
    }

    fn is_work_free(&self, raw: &RawHoliday) -> bool {
        let kind = raw.kind.trim().to_lowercase();
        !raw.is_substitute
            && kind != "observance"
            && self
                .cfg
                .holiday_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&kind))
    }

    /// Turn raw definitions into sorted, de-duplicated entries with
    /// content-derived ids.
    pub fn prepare(&self, raw: &[RawHoliday], country: &str, region: &str) -> Vec<HolidayEntry> {
        let country = country.trim().to_uppercase();
        let region = region.trim().to_uppercase();

        let unique: BTreeSet<(NaiveDate, String)> = raw
            .iter()
            .filter(|h| self.is_work_free(h))
            .filter_map(|h| Some((normalize_date(&h.date)?, h.name.trim().to_string())))
            .collect();

        unique
            .into_iter()
            .map(|(date, name)| HolidayEntry {
                id: holiday_id(&country, &region, date, &name),
                date,
                name,
                country: country.clone(),
                region: region.clone(),
            })
            .collect()
    }

    /// Import the work-free holidays of `year` for `country`/`region`.
    ///
    /// Idempotent without `force`; with `force` the tuple's entries are
    /// replaced. Other years and regions are never touched.
    pub fn init_holidays(
        &mut self,
        source: &dyn HolidaySource,
        year: i32,
        country: &str,
        region: &str,
        force: bool,
    ) -> AppResult<InitOutcome> {
        let all = self.stores.holidays.load_all()?;
        let (existing, others): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|h| h.matches(year, country, region));

        if !existing.is_empty() && !force {
            tracing::info!(year, country, region, count = existing.len(), "holidays already initialized");
            return Ok(InitOutcome::AlreadyInitialized {
                existing: existing.len(),
            });
        }

        let raw = source.fetch(year, country, region)?;
        if raw.is_empty() {
            return Err(AppError::HolidaySource(format!(
                "no holidays found for {country}/{region} in {year}: unsupported or misconfigured region"
            )));
        }

        let fresh = self.prepare(&raw, country, region);
        tracing::debug!(raw = raw.len(), kept = fresh.len(), "holiday definitions filtered");

        let count = fresh.len();
        let replaced = existing.len();
        let mut next = others;
        next.extend(fresh);
        next.sort_by(|a, b| (a.date, &a.name).cmp(&(b.date, &b.name)));
        self.stores.holidays.rewrite_all(&next)?;

        tracing::info!(year, country, region, count, replaced, "holidays imported");
        Ok(InitOutcome::Imported { count, replaced })
    }

    pub fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        Ok(self
            .stores
            .holidays
            .load_all()?
            .iter()
            .any(|h| h.date == date))
    }

    /// Holiday entries in `start..=end`, by date.
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<HolidayEntry>> {
        let mut out: Vec<HolidayEntry> = self
            .stores
            .holidays
            .load_all()?
            .into_iter()
            .filter(|h| start <= h.date && h.date <= end)
            .collect();
        out.sort_by(|a, b| (a.date, &a.name).cmp(&(b.date, &b.name)));
        Ok(out)
    }

    /// Distinct holiday dates in `start..=end`.
    pub fn holiday_dates(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self
            .entries_between(start, end)?
            .into_iter()
            .map(|h| h.date)
            .collect();
        Ok(dates.into_iter().collect())
    }

    pub fn holiday_count(&self, start: NaiveDate, end: NaiveDate) -> AppResult<usize> {
        Ok(self.holiday_dates(start, end)?.len())
    }
}
