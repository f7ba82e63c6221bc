//! The live work session: NoSession → Active ⇄ Paused → stopped into a
//! [`TimeEntry`].

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::config::Config;
use crate::core::calculator::pause::{suggest_pause, target_daily_minutes};
use crate::core::overlap::OverlapGuard;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryType, TimeEntry, WorkSession};
use crate::storage::Stores;
use crate::ui::prompt::Prompter;
use crate::utils::date::{day_in, today};
use crate::utils::formatting::mins2readable;
use crate::utils::ids::entry_id;
use crate::utils::time::{current_paused_ms, elapsed_ms, ms_to_minutes};

/// What `stop` did.
#[derive(Debug, Clone)]
pub struct StopReport {
    pub entry: TimeEntry,
    pub gross_minutes: f64,
    pub tracked_pause_minutes: f64,
    pub suggested_pause_minutes: i64,
    pub suggestion_applied: bool,
}

/// Read-only view of a running session, for the timer display.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub start_time: DateTime<Utc>,
    pub is_paused: bool,
    pub elapsed_ms: i64,
    pub paused_ms: i64,
    /// Completed entries of today plus the live elapsed time.
    pub today_worked_ms: i64,
    /// When the daily target will be reached; `None` without a target.
    pub projected_end: Option<DateTime<Utc>>,
}

pub struct SessionManager<'a> {
    cfg: &'a Config,
    stores: &'a mut Stores,
    clock: &'a dyn Clock,
}

impl<'a> SessionManager<'a> {
    pub fn new(cfg: &'a Config, stores: &'a mut Stores, clock: &'a dyn Clock) -> Self {
        Self { cfg, stores, clock }
    }

    fn require_session(&self) -> AppResult<WorkSession> {
        self.stores.session.load()?.ok_or(AppError::NoSession)
    }

    pub fn current(&self) -> AppResult<Option<WorkSession>> {
        self.stores.session.load()
    }

    pub fn start(&mut self) -> AppResult<WorkSession> {
        if let Some(existing) = self.stores.session.load()? {
            let local = existing.start_time.with_timezone(&self.cfg.tz());
            return Err(AppError::SessionActive(
                local.format("%Y-%m-%d %H:%M").to_string(),
            ));
        }

        let now = self.clock.now();
        let date = today(now, self.cfg.tz());
        if let Some(kind) = OverlapGuard::new(self.stores, self.cfg.tz()).leave_on(date)? {
            return Err(AppError::LeaveDay { date, kind });
        }

        let session = WorkSession::new(now);
        self.stores.session.save(&session)?;
        tracing::info!(start = %now, "session started");
        Ok(session)
    }

    pub fn pause(&mut self) -> AppResult<WorkSession> {
        let mut session = self.require_session()?;
        if session.is_paused {
            return Err(AppError::AlreadyPaused);
        }

        let now = self.clock.now();
        session.is_paused = true;
        session.pause_start_time = Some(now);
        self.stores.session.save(&session)?;
        tracing::info!(at = %now, "session paused");
        Ok(session)
    }

    pub fn resume(&mut self) -> AppResult<WorkSession> {
        let mut session = self.require_session()?;
        if !session.is_paused {
            return Err(AppError::NotPaused);
        }

        let now = self.clock.now();
        session.paused_time_ms = current_paused_ms(&session, now);
        session.is_paused = false;
        session.pause_start_time = None;
        self.stores.session.save(&session)?;
        tracing::info!(at = %now, paused_ms = session.paused_time_ms, "session resumed");
        Ok(session)
    }

    /// Close the session into a time entry.
    ///
    /// When the gross time exceeds the daily target by more than the pause
    /// already tracked, the prompter is asked whether to book the difference
    /// as pause. Accepting replaces the tracked pause; declining keeps it.
    pub fn stop(
        &mut self,
        prompter: &mut dyn Prompter,
        description: Option<String>,
    ) -> AppResult<StopReport> {
        let session = self.require_session()?;
        let now = self.clock.now();

        // Leave recorded for the session's day after it started blocks the
        // entry; the session stays as it is.
        let date = day_in(session.start_time, self.cfg.tz());
        if let Some(kind) = OverlapGuard::new(self.stores, self.cfg.tz()).leave_on(date)? {
            return Err(AppError::LeaveDay { date, kind });
        }

        let tracked_pause_minutes = ms_to_minutes(current_paused_ms(&session, now));
        let gross_minutes = ms_to_minutes((now - session.start_time).num_milliseconds().max(0));
        let suggested = suggest_pause(gross_minutes, target_daily_minutes(self.cfg));

        let mut applied = false;
        if suggested > 0 && suggested as f64 > tracked_pause_minutes {
            let question = format!(
                "You worked {} gross with {} of pause tracked. Book a {} min pause to match your daily target?",
                mins2readable(gross_minutes.floor() as i64, false, false),
                mins2readable(tracked_pause_minutes.floor() as i64, false, false),
                suggested
            );
            applied = prompter.confirm(&question, true)?;
        }
        let pause_time = if applied {
            suggested as f64
        } else {
            tracked_pause_minutes
        };

        let entry = TimeEntry {
            id: entry_id(now),
            date,
            start_time: session.start_time,
            end_time: Some(now),
            pause_time,
            entry_type: EntryType::Work,
            description: description.filter(|d| !d.trim().is_empty()),
        };
        self.stores.time.append(entry.clone())?;
        self.stores.session.clear()?;

        tracing::info!(
            date = %entry.date,
            gross_minutes,
            pause_minutes = pause_time,
            suggestion_applied = applied,
            "session stopped"
        );
        Ok(StopReport {
            entry,
            gross_minutes,
            tracked_pause_minutes,
            suggested_pause_minutes: suggested,
            suggestion_applied: applied,
        })
    }

    /// Timer figures for the running session at the clock's current time.
    pub fn snapshot(&self) -> AppResult<Option<TimerSnapshot>> {
        let Some(session) = self.stores.session.load()? else {
            return Ok(None);
        };
        let now = self.clock.now();
        let date = today(now, self.cfg.tz());
        let completed_ms: i64 = self
            .stores
            .time
            .load_all()?
            .iter()
            .filter(|e| e.date == date)
            .map(TimeEntry::working_ms)
            .sum();
        Ok(Some(snapshot(self.cfg, &session, completed_ms, now)))
    }
}

/// Pure timer arithmetic.
///
/// Projected end = start + remaining daily target + accumulated pause, where
/// the remaining target discounts work already completed today.
pub fn snapshot(
    cfg: &Config,
    session: &WorkSession,
    completed_today_ms: i64,
    now: DateTime<Utc>,
) -> TimerSnapshot {
    let elapsed = elapsed_ms(session, now);
    let paused = current_paused_ms(session, now);
    let projected_end = (cfg.working_days_count() > 0).then(|| {
        let remaining = (cfg.daily_target_ms() - completed_today_ms).max(0);
        session.start_time + Duration::milliseconds(remaining + paused)
    });

    TimerSnapshot {
        start_time: session.start_time,
        is_paused: session.is_paused,
        elapsed_ms: elapsed,
        paused_ms: paused,
        today_worked_ms: completed_today_ms + elapsed,
        projected_end,
    }
}
