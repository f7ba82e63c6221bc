use chrono::{Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::MS_PER_HOUR;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    #[serde(alias = "dayName")]
    pub day_name: String,
    #[serde(alias = "isWorkingDay")]
    pub is_working_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    #[serde(alias = "hoursPerWeek")]
    pub hours_per_week: f64,
    #[serde(alias = "vacationDaysPerYear")]
    pub vacation_days_per_year: f64,
    #[serde(alias = "workingDays", default = "default_working_days")]
    pub working_days: Vec<WorkingDay>,
    #[serde(alias = "dataDirectory")]
    pub data_directory: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(alias = "setupCompleted", default)]
    pub setup_completed: bool,
    #[serde(alias = "startDate", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_holiday_types")]
    pub holiday_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_region: Option<String>,
}

/// Monday to Friday.
pub fn default_working_days() -> Vec<WorkingDay> {
    WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| WorkingDay {
            day_name: name.to_string(),
            is_working_day: i < 5,
        })
        .collect()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_holiday_types() -> Vec<String> {
    vec!["public".to_string(), "bank".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::new(),
            hours_per_week: 40.0,
            vacation_days_per_year: 25.0,
            working_days: default_working_days(),
            data_directory: Self::default_data_dir().to_string_lossy().to_string(),
            timezone: default_timezone(),
            setup_completed: false,
            start_date: None,
            holiday_types: default_holiday_types(),
            holiday_country: None,
            holiday_region: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("clockin")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".clockin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("clockin.conf")
    }

    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Load and validate the configuration at `path`.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;

        let problems = cfg.problems();
        if !problems.is_empty() {
            return Err(AppError::Config(problems.join("; ")));
        }

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Every validation failure of this configuration; empty when valid.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();

        if !(self.hours_per_week > 0.0 && self.hours_per_week <= 168.0) {
            out.push(format!(
                "hours_per_week must be in (0, 168], got {}",
                self.hours_per_week
            ));
        }
        if !(self.vacation_days_per_year >= 0.0) {
            out.push(format!(
                "vacation_days_per_year must be >= 0, got {}",
                self.vacation_days_per_year
            ));
        }

        if self.working_days.len() != 7 {
            out.push(format!(
                "working_days must list all 7 weekdays, got {}",
                self.working_days.len()
            ));
        }
        let mut seen = HashSet::new();
        for wd in &self.working_days {
            let key = wd.day_name.to_lowercase();
            if !WEEKDAY_NAMES.iter().any(|n| n.eq_ignore_ascii_case(&key)) {
                out.push(format!("unknown weekday '{}'", wd.day_name));
            } else if !seen.insert(key) {
                out.push(format!("weekday '{}' listed twice", wd.day_name));
            }
        }

        if self.timezone.parse::<Tz>().is_err() {
            out.push(format!("unknown timezone '{}'", self.timezone));
        }
        if self.data_directory.trim().is_empty() {
            out.push("data_directory must not be empty".to_string());
        }

        out
    }

    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }

    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.data_directory)
    }

    pub fn is_working_weekday(&self, weekday: Weekday) -> bool {
        let name = WEEKDAY_NAMES[weekday.num_days_from_monday() as usize];
        self.working_days
            .iter()
            .any(|wd| wd.is_working_day && wd.day_name.eq_ignore_ascii_case(name))
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.is_working_weekday(date.weekday())
    }

    pub fn working_days_count(&self) -> usize {
        self.working_days.iter().filter(|wd| wd.is_working_day).count()
    }

    /// Expected hours for one working day; `None` without working days.
    pub fn daily_target_hours(&self) -> Option<f64> {
        match self.working_days_count() {
            0 => None,
            n => Some(self.hours_per_week / n as f64),
        }
    }

    pub fn daily_target_ms(&self) -> i64 {
        self.daily_target_hours()
            .map(|h| (h * MS_PER_HOUR as f64).round() as i64)
            .unwrap_or(0)
    }

    pub fn weekly_target_ms(&self) -> i64 {
        (self.hours_per_week * MS_PER_HOUR as f64).round() as i64
    }

    /// Replace the working-day flags from a list of weekday names or
    /// three-letter abbreviations (`mon,tue,wed`).
    pub fn set_working_days(&mut self, names: &[String]) -> AppResult<()> {
        let mut flags = [false; 7];
        for raw in names {
            let key = raw.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let idx = WEEKDAY_NAMES
                .iter()
                .position(|n| n.to_lowercase().starts_with(&key) && key.len() >= 3)
                .ok_or_else(|| AppError::Config(format!("unknown weekday '{raw}'")))?;
            flags[idx] = true;
        }
        self.working_days = WEEKDAY_NAMES
            .iter()
            .zip(flags)
            .map(|(name, on)| WorkingDay {
                day_name: name.to_string(),
                is_working_day: on,
            })
            .collect();
        Ok(())
    }
}
