//! Unified application error type.
//! All modules (storage, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

use crate::models::leave::LeaveKind;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt store: {0}")]
    Csv(#[from] csv::Error),

    #[error("Corrupt session file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Conflicts
    // ---------------------------
    #[error("Overlaps with existing {with} on: {}", join_dates(.dates))]
    Overlap { with: Conflict, dates: Vec<NaiveDate> },

    #[error("Cannot track work on {date}: it is a {kind} day")]
    LeaveDay { date: NaiveDate, kind: LeaveKind },

    #[error("A work session is already running (started {0})")]
    SessionActive(String),

    #[error("The work session is already paused")]
    AlreadyPaused,

    #[error("The work session is not paused")]
    NotPaused,

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("No active work session")]
    NoSession,

    #[error("No time entries found for date {0}")]
    NoEntriesForDate(NaiveDate),

    // ---------------------------
    // External sources / config
    // ---------------------------
    #[error("Holiday source error: {0}")]
    HolidaySource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration not found at {0}. Run `clockin init` first.")]
    ConfigMissing(String),
}

/// What a set of candidate dates collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Leave(LeaveKind),
    TimeEntry,
    Session,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conflict::Leave(kind) => write!(f, "{kind} leave"),
            Conflict::TimeEntry => f.write_str("time entries"),
            Conflict::Session => f.write_str("running work session"),
        }
    }
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// Business-rule failures: reported to the user, the command still exits 0.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidTime(_)
                | AppError::Validation(_)
                | AppError::Overlap { .. }
                | AppError::LeaveDay { .. }
                | AppError::SessionActive(_)
                | AppError::AlreadyPaused
                | AppError::NotPaused
                | AppError::NoSession
                | AppError::NoEntriesForDate(_)
        )
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
