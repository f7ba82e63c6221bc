use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::working_time_ms;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Work,
}

/// A closed (or, transiently, open) block of work on one logical day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub date: NaiveDate, // logical day in the configured timezone
    #[serde(alias = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(alias = "endTime", default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(alias = "pauseTime", alias = "pause", default)]
    pub pause_time: f64, // minutes
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    #[serde(default)]
    pub description: Option<String>,
}

impl TimeEntry {
    /// Net worked milliseconds; 0 for an open entry.
    pub fn working_ms(&self) -> i64 {
        working_time_ms(Some(self.start_time), self.end_time, self.pause_time)
    }

    /// Gross minutes between start and end, no pause subtracted.
    pub fn gross_minutes(&self) -> f64 {
        match self.end_time {
            Some(end) => ((end - self.start_time).num_milliseconds().max(0)) as f64 / 60_000.0,
            None => 0.0,
        }
    }
}
