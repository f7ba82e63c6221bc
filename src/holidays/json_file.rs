use std::fs;
use std::path::PathBuf;

use super::{HolidaySource, RawHoliday};
use crate::errors::AppResult;

/// Holiday definitions exported from an external database as a JSON array of
/// `{date, name, type, isSubstitute}` objects.
///
/// The file is assumed to describe a single country/region; only the year is
/// used to filter it.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HolidaySource for JsonFileSource {
    fn fetch(&self, year: i32, _country: &str, _region: &str) -> AppResult<Vec<RawHoliday>> {
        let content = fs::read_to_string(&self.path)?;
        let all: Vec<RawHoliday> = serde_json::from_str(&content)?;
        let prefix = format!("{year:04}-");
        Ok(all
            .into_iter()
            .filter(|h| h.date.trim().starts_with(&prefix))
            .collect())
    }
}
