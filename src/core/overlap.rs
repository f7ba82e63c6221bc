//! Keeps every calendar date claimed by at most one of vacation, sick leave
//! and (manual) time entries.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::errors::{AppError, AppResult, Conflict};
use crate::models::{LeaveEntry, LeaveKind};
use crate::storage::Stores;
use crate::utils::date::day_in;

/// Inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Span {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date == self.start || date == self.end || (date > self.start && date < self.end)
    }
}

impl From<&LeaveEntry> for Span {
    fn from(entry: &LeaveEntry) -> Self {
        Span::new(entry.start_date, entry.end_date)
    }
}

/// Candidates that fall inside at least one span, in candidate order.
///
/// Each candidate is reported once even if several spans match it.
pub fn find_overlaps(candidates: &[NaiveDate], spans: &[Span]) -> Vec<NaiveDate> {
    candidates
        .iter()
        .copied()
        .filter(|d| spans.iter().any(|s| s.contains(*d)))
        .collect()
}

/// Read-only view over the stores that answers "is this date taken?".
pub struct OverlapGuard<'a> {
    stores: &'a Stores,
    tz: Tz,
}

impl<'a> OverlapGuard<'a> {
    /// `tz` decides which day a running session belongs to.
    pub fn new(stores: &'a Stores, tz: Tz) -> Self {
        Self { stores, tz }
    }

    fn leave_spans(&self, kind: LeaveKind) -> AppResult<Vec<Span>> {
        Ok(self
            .stores
            .leave(kind)
            .load_all()?
            .iter()
            .map(Span::from)
            .collect())
    }

    /// Fails when any candidate is already covered by a `kind` leave entry.
    pub fn check_leave_overlap(&self, candidates: &[NaiveDate], kind: LeaveKind) -> AppResult<()> {
        let hits = find_overlaps(candidates, &self.leave_spans(kind)?);
        if hits.is_empty() {
            return Ok(());
        }
        tracing::debug!(?kind, dates = ?hits, "leave overlap");
        Err(AppError::Overlap {
            with: Conflict::Leave(kind),
            dates: hits,
        })
    }

    /// Fails when any candidate already has a time entry.
    pub fn check_time_entry_overlap(&self, candidates: &[NaiveDate]) -> AppResult<()> {
        let spans: Vec<Span> = self
            .stores
            .time
            .load_all()?
            .iter()
            .map(|e| Span::day(e.date))
            .collect();
        let hits = find_overlaps(candidates, &spans);
        if hits.is_empty() {
            return Ok(());
        }
        tracing::debug!(dates = ?hits, "time entry overlap");
        Err(AppError::Overlap {
            with: Conflict::TimeEntry,
            dates: hits,
        })
    }

    /// Fails when a running session started on one of the candidates. The
    /// session becomes a time entry for that day once it is stopped.
    pub fn check_session_overlap(&self, candidates: &[NaiveDate]) -> AppResult<()> {
        let Some(session) = self.stores.session.load()? else {
            return Ok(());
        };
        let day = day_in(session.start_time, self.tz);
        let hits = find_overlaps(candidates, &[Span::day(day)]);
        if hits.is_empty() {
            return Ok(());
        }
        tracing::debug!(dates = ?hits, "running session overlap");
        Err(AppError::Overlap {
            with: Conflict::Session,
            dates: hits,
        })
    }

    /// The full check a new leave entry must pass, in order: the other leave
    /// category, the same category, then time entries and the running session.
    pub fn check_new_leave(&self, candidates: &[NaiveDate], kind: LeaveKind) -> AppResult<()> {
        self.check_leave_overlap(candidates, kind.opposite())?;
        self.check_leave_overlap(candidates, kind)?;
        self.check_time_entry_overlap(candidates)?;
        self.check_session_overlap(candidates)
    }

    /// The check a manual time entry must pass: no leave of either kind and
    /// no other entry on the same date.
    pub fn check_new_time_entry(&self, date: NaiveDate) -> AppResult<()> {
        let candidates = [date];
        self.check_leave_overlap(&candidates, LeaveKind::Vacation)?;
        self.check_leave_overlap(&candidates, LeaveKind::Sick)?;
        self.check_time_entry_overlap(&candidates)
    }

    /// Which leave, if any, covers `date`. Sick leave wins over vacation.
    pub fn leave_on(&self, date: NaiveDate) -> AppResult<Option<LeaveKind>> {
        for kind in [LeaveKind::Sick, LeaveKind::Vacation] {
            if !find_overlaps(&[date], &self.leave_spans(kind)?).is_empty() {
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }
}
