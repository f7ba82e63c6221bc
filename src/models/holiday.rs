use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed public holiday for a country/region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub country: String,
    pub region: String,
}

impl HolidayEntry {
    pub fn matches(&self, year: i32, country: &str, region: &str) -> bool {
        use chrono::Datelike;
        self.date.year() == year
            && self.country.eq_ignore_ascii_case(country)
            && self.region.eq_ignore_ascii_case(region)
    }
}
