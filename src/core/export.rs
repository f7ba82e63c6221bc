use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::models::{HolidayEntry, LeaveEntry, TimeEntry};
use crate::storage::Stores;
use crate::ui::prompt::Prompter;
use crate::utils::path::{is_absolute, temp_sibling};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Time,
    Vacation,
    Sick,
    Holidays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// The range selected nothing; no file was touched.
    Empty,
    Cancelled,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write one store to `path`, optionally limited to `range`.
    ///
    /// Leave entries are selected when any of their days falls inside the
    /// range.
    pub fn export(
        stores: &Stores,
        kind: ExportKind,
        format: ExportFormat,
        path: &Path,
        range: Option<(NaiveDate, NaiveDate)>,
        force: bool,
        prompter: &mut dyn Prompter,
    ) -> AppResult<ExportOutcome> {
        let in_range = |d: NaiveDate| range.is_none_or(|(s, e)| s <= d && d <= e);
        let spans = |s: NaiveDate, e: NaiveDate| range.is_none_or(|(rs, re)| s <= re && e >= rs);

        match kind {
            ExportKind::Time => {
                let rows: Vec<TimeEntry> = stores
                    .time
                    .load_all()?
                    .into_iter()
                    .filter(|e| in_range(e.date))
                    .collect();
                write_rows(&rows, format, path, force, prompter)
            }
            ExportKind::Vacation | ExportKind::Sick => {
                let store = if kind == ExportKind::Vacation {
                    &stores.vacation
                } else {
                    &stores.sick
                };
                let rows: Vec<LeaveEntry> = store
                    .load_all()?
                    .into_iter()
                    .filter(|e| spans(e.start_date, e.end_date))
                    .collect();
                write_rows(&rows, format, path, force, prompter)
            }
            ExportKind::Holidays => {
                let rows: Vec<HolidayEntry> = stores
                    .holidays
                    .load_all()?
                    .into_iter()
                    .filter(|h| in_range(h.date))
                    .collect();
                write_rows(&rows, format, path, force, prompter)
            }
        }
    }
}

fn write_rows<T: Serialize>(
    rows: &[T],
    format: ExportFormat,
    path: &Path,
    force: bool,
    prompter: &mut dyn Prompter,
) -> AppResult<ExportOutcome> {
    if rows.is_empty() {
        return Ok(ExportOutcome::Empty);
    }
    if !ensure_writable(path, force, prompter)? {
        return Ok(ExportOutcome::Cancelled);
    }

    let tmp = temp_sibling(path);
    match format {
        ExportFormat::Csv => export_csv(rows, &tmp)?,
        ExportFormat::Json => export_json(rows, &tmp)?,
    }
    std::fs::rename(&tmp, path)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "export written");
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}

/// Whether `path` may be (over)written.
fn ensure_writable(path: &Path, force: bool, prompter: &mut dyn Prompter) -> AppResult<bool> {
    if !path.exists() || force {
        return Ok(true);
    }
    prompter.confirm(
        &format!("File '{}' already exists. Overwrite?", path.display()),
        false,
    )
}

fn export_json<T: Serialize>(rows: &[T], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(rows)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

fn export_csv<T: Serialize>(rows: &[T], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for item in rows {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExportKind::Time => "time entries",
            ExportKind::Vacation => "vacation entries",
            ExportKind::Sick => "sick entries",
            ExportKind::Holidays => "holidays",
        })
    }
}

/// Refuse relative output paths, like every file-writing command.
pub fn require_absolute(path: &str) -> AppResult<PathBuf> {
    if !is_absolute(path) {
        return Err(AppError::validation(format!(
            "Output file path must be absolute: {path}"
        )));
    }
    Ok(PathBuf::from(path))
}
