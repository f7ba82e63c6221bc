use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two mutually exclusive leave categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveKind {
    Vacation,
    Sick,
}

impl LeaveKind {
    /// The category a new entry of this kind must not collide with.
    pub fn opposite(self) -> Self {
        match self {
            LeaveKind::Vacation => LeaveKind::Sick,
            LeaveKind::Sick => LeaveKind::Vacation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeaveKind::Vacation => "vacation",
            LeaveKind::Sick => "sick",
        }
    }

    /// Default description: "1 sick day", "3 vacation days".
    pub fn default_description(self, days: u32) -> String {
        let unit = if days == 1 { "day" } else { "days" };
        format!("{} {} {}", days, self.as_str(), unit)
    }
}

impl fmt::Display for LeaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous span of leave.
///
/// For vacation the span only counts working days (`days` = working days
/// inside `start_date..=end_date`); for sick leave it counts calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub id: String,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
    pub days: u32,
    #[serde(default)]
    pub description: String,
}

pub type VacationEntry = LeaveEntry;
pub type SickEntry = LeaveEntry;

impl LeaveEntry {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
