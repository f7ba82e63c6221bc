use serde_yaml::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Keys every configuration file must spell out.
const REQUIRED_KEYS: [&str; 4] = [
    "name",
    "hours_per_week",
    "vacation_days_per_year",
    "data_directory",
];

/// Keys that fall back to a default when absent.
const DEFAULTED_KEYS: [&str; 7] = [
    "working_days",
    "timezone",
    "setup_completed",
    "start_date",
    "holiday_types",
    "holiday_country",
    "holiday_region",
];

/// Result of `config --check`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    /// Problems that make the configuration unusable.
    pub errors: Vec<String>,
    /// Optional keys that are absent and fall back to defaults.
    pub defaulted: Vec<String>,
}

impl ConfigReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn has_key(map: &serde_yaml::Mapping, key: &str) -> bool {
    let camel = camel_case(key);
    map.contains_key(Value::from(key)) || map.contains_key(Value::from(camel.as_str()))
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<String> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Open `path` in `editor`, `$EDITOR`/`$VISUAL`, or the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<String> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }
        let ed = editor
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start editor '{ed}': {e}")))?;
        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        Ok(ed)
    }

    /// Validate the file at `path` without failing on the first problem.
    pub fn check(path: &Path) -> AppResult<ConfigReport> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let mut report = ConfigReport::default();

        let value: Value = match serde_yaml::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                report.errors.push(format!("not valid YAML: {e}"));
                return Ok(report);
            }
        };
        let Some(map) = value.as_mapping() else {
            report.errors.push("top level must be a mapping".to_string());
            return Ok(report);
        };

        for key in REQUIRED_KEYS {
            if !has_key(map, key) {
                report.errors.push(format!("missing required field '{key}'"));
            }
        }
        for key in DEFAULTED_KEYS {
            if !has_key(map, key) {
                report.defaulted.push(key.to_string());
            }
        }
        if !report.errors.is_empty() {
            return Ok(report);
        }

        match serde_yaml::from_value::<Config>(value.clone()) {
            Ok(cfg) => report.errors.extend(cfg.problems()),
            Err(e) => report.errors.push(e.to_string()),
        }
        tracing::debug!(path = %path.display(), errors = report.errors.len(), "configuration checked");
        Ok(report)
    }
}
