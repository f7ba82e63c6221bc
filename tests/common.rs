#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveDate, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;

use clockin::config::Config;
use clockin::storage::Stores;

pub fn clk() -> Command {
    cargo_bin_cmd!("clockin")
}

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// 40h over Monday–Friday in UTC, 25 vacation days.
pub fn test_config() -> Config {
    Config {
        name: "Test User".to_string(),
        hours_per_week: 40.0,
        vacation_days_per_year: 25.0,
        data_directory: env::temp_dir().to_string_lossy().to_string(),
        timezone: "UTC".to_string(),
        setup_completed: true,
        ..Config::default()
    }
}

/// A fresh, empty directory inside the system temp dir.
/// Row counts of the time, vacation, sick and holiday stores, in that order.
pub fn store_counts(stores: &Stores) -> [usize; 4] {
    [
        stores.time.load_all().unwrap().len(),
        stores.vacation.load_all().unwrap().len(),
        stores.sick.load_all().unwrap().len(),
        stores.holidays.load_all().unwrap().len(),
    ]
}

pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("clockin_test_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Isolated config file and data directory for CLI tests.
pub struct Env {
    pub root: PathBuf,
    pub config: String,
    pub data: String,
}

impl Env {
    pub fn new(name: &str) -> Self {
        let root = temp_dir(name);
        let config = root.join("clockin.conf").to_string_lossy().to_string();
        let data = root.join("data").to_string_lossy().to_string();
        Self { root, config, data }
    }

    /// `clockin --config <file>` plus `args`.
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = clk();
        cmd.args(["--config", &self.config]).args(args);
        cmd
    }

    /// Same as [`Env::cmd`] with the clock pinned to `now`.
    pub fn at(&self, now: &str, args: &[&str]) -> Command {
        let mut cmd = clk();
        cmd.args(["--config", &self.config, "--now", now]).args(args);
        cmd
    }

    /// Run `init` with the given weekly hours, Monday–Friday, UTC.
    pub fn init(&self, hours: &str) {
        clk()
            .args([
                "--config",
                &self.config,
                "--data-dir",
                &self.data,
                "init",
                "--name",
                "Test User",
                "--hours-per-week",
                hours,
            ])
            .assert()
            .success();
    }

    pub fn path(&self, file: &str) -> String {
        self.root.join(file).to_string_lossy().to_string()
    }
}
