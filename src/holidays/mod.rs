//! Public-holiday definitions, as delivered by a holiday database.
//!
//! The [`HolidaySource`] trait is all the holiday manager needs; the built-in
//! calendar and the JSON file reader are the two shipped implementations.

mod builtin;
mod easter;
mod json_file;

pub use builtin::BuiltinCalendar;
pub use easter::easter_sunday;
pub use json_file::JsonFileSource;

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// One holiday as the source describes it, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHoliday {
    /// ISO date, possibly with a time part (`2025-12-24 14:00:00`).
    pub date: String,
    pub name: String,
    /// `public`, `bank`, `school`, `optional` or `observance`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "isSubstitute", alias = "substitute")]
    pub is_substitute: bool,
}

impl RawHoliday {
    pub fn new(date: chrono::NaiveDate, name: &str, kind: &str) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            is_substitute: false,
        }
    }

    pub fn substitute(mut self) -> Self {
        self.is_substitute = true;
        self
    }
}

pub trait HolidaySource {
    /// Every holiday of `year` for the country/region. An empty list means
    /// the source does not know the region.
    fn fetch(&self, year: i32, country: &str, region: &str) -> AppResult<Vec<RawHoliday>>;
}
