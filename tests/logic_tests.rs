use std::fs;

use clockin::config::Config;
use clockin::core::backup::{BackupLogic, BackupOutcome};
use clockin::core::config::ConfigLogic;
use clockin::core::export::{ExportFormat, ExportKind, ExportLogic, ExportOutcome, require_absolute};
use clockin::errors::AppError;
use clockin::models::{EntryType, LeaveEntry, TimeEntry, WorkSession};
use clockin::storage::Stores;
use clockin::ui::prompt::{AutoConfirm, ScriptedPrompter};

mod common;
use common::{d, temp_dir, test_config, utc};

fn entry(date: &str) -> TimeEntry {
    TimeEntry {
        id: format!("id{date}"),
        date: d(date),
        start_time: utc(&format!("{date}T08:00:00Z")),
        end_time: Some(utc(&format!("{date}T16:00:00Z"))),
        pause_time: 0.0,
        entry_type: EntryType::Work,
        description: None,
    }
}

fn vacation(start: &str, end: &str, days: u32) -> LeaveEntry {
    LeaveEntry {
        id: format!("v{start}"),
        start_date: d(start),
        end_date: d(end),
        days,
        description: format!("{days} vacation days"),
    }
}

fn sample_stores() -> Stores {
    let mut stores = Stores::in_memory();
    for date in ["2025-01-06", "2025-01-31", "2025-02-03"] {
        stores.time.append(entry(date)).unwrap();
    }
    stores.vacation.append(vacation("2024-12-30", "2025-01-02", 3)).unwrap();
    stores.vacation.append(vacation("2025-03-03", "2025-03-04", 2)).unwrap();
    stores
}

#[test]
fn test_export_json_with_range() {
    let dir = temp_dir("export_json");
    let path = dir.join("time.json");
    let stores = sample_stores();

    let outcome = ExportLogic::export(
        &stores,
        ExportKind::Time,
        ExportFormat::Json,
        &path,
        Some((d("2025-01-01"), d("2025-01-31"))),
        false,
        &mut ScriptedPrompter::default(),
    )
    .unwrap();
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            rows: 2
        }
    );

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2025-01-06");
}

#[test]
fn test_export_leave_spanning_range_start() {
    let dir = temp_dir("export_leave");
    let path = dir.join("vacation.csv");
    let stores = sample_stores();

    let outcome = ExportLogic::export(
        &stores,
        ExportKind::Vacation,
        ExportFormat::Csv,
        &path,
        Some((d("2025-01-01"), d("2025-01-31"))),
        false,
        &mut ScriptedPrompter::default(),
    )
    .unwrap();
    assert!(matches!(outcome, ExportOutcome::Written { rows: 1, .. }));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,start_date,end_date,days,description"));
    assert!(text.contains("2024-12-30,2025-01-02,3"));
}

#[test]
fn test_export_empty_selection_writes_nothing() {
    let dir = temp_dir("export_empty");
    let path = dir.join("sick.csv");
    let stores = sample_stores();

    let outcome = ExportLogic::export(
        &stores,
        ExportKind::Sick,
        ExportFormat::Csv,
        &path,
        None,
        false,
        &mut ScriptedPrompter::default(),
    )
    .unwrap();
    assert_eq!(outcome, ExportOutcome::Empty);
    assert!(!path.exists());
}

#[test]
fn test_export_asks_before_overwriting() {
    let dir = temp_dir("export_overwrite");
    let path = dir.join("time.csv");
    fs::write(&path, "keep me").unwrap();
    let stores = sample_stores();

    let mut decline = ScriptedPrompter::new(["n"]);
    let outcome = ExportLogic::export(
        &stores,
        ExportKind::Time,
        ExportFormat::Csv,
        &path,
        None,
        false,
        &mut decline,
    )
    .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(decline.asked.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    let outcome = ExportLogic::export(
        &stores,
        ExportKind::Time,
        ExportFormat::Csv,
        &path,
        None,
        true,
        &mut AutoConfirm(false),
    )
    .unwrap();
    assert!(matches!(outcome, ExportOutcome::Written { rows: 3, .. }));
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 4);
}

#[test]
fn test_export_paths_must_be_absolute() {
    let err = require_absolute("out/time.csv").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("must be absolute"));

    let abs = temp_dir("export_abs").join("x.csv");
    assert_eq!(require_absolute(&abs.to_string_lossy()).unwrap(), abs);
}

#[test]
fn test_export_kind_names() {
    assert_eq!(ExportKind::Time.to_string(), "time entries");
    assert_eq!(ExportKind::Holidays.to_string(), "holidays");
}

#[test]
fn test_backup_zips_existing_stores() {
    let dir = temp_dir("backup_data");
    let cfg = Config {
        data_directory: dir.join("data").to_string_lossy().to_string(),
        ..test_config()
    };

    let mut stores = Stores::open(&cfg.data_dir());
    stores.time.append(entry("2025-01-06")).unwrap();
    stores
        .session
        .save(&WorkSession::new(utc("2025-01-07T08:00:00Z")))
        .unwrap();

    let dest = dir.join("out").join("backup.zip");
    let outcome = BackupLogic::backup(&cfg, &dest, false, &mut AutoConfirm(false)).unwrap();
    match outcome {
        BackupOutcome::Written { path, files } => {
            assert_eq!(path, dest);
            assert_eq!(files, vec!["time_entries.csv", "session.json"]);
        }
        BackupOutcome::Cancelled => panic!("backup cancelled"),
    }

    let archive = zip::ZipArchive::new(fs::File::open(&dest).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);

    // Existing archive, declined.
    let again = BackupLogic::backup(&cfg, &dest, false, &mut ScriptedPrompter::new(["n"])).unwrap();
    assert_eq!(again, BackupOutcome::Cancelled);
}

#[test]
fn test_backup_of_empty_data_dir_fails() {
    let dir = temp_dir("backup_empty");
    let cfg = Config {
        data_directory: dir.to_string_lossy().to_string(),
        ..test_config()
    };
    let err = BackupLogic::backup(&cfg, &dir.join("b.zip"), true, &mut AutoConfirm(true)).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(!dir.join("b.zip").exists());
}

#[test]
fn test_config_check() {
    let dir = temp_dir("config_check");
    let path = dir.join("clockin.conf");

    fs::write(
        &path,
        "name: Test\nhoursPerWeek: 40\nvacation_days_per_year: 25\ndata_directory: /tmp/clockin\n",
    )
    .unwrap();
    let report = ConfigLogic::check(&path).unwrap();
    assert!(report.is_valid(), "{:?}", report.errors);
    assert!(report.defaulted.contains(&"timezone".to_string()));
    assert!(report.defaulted.contains(&"working_days".to_string()));

    fs::write(&path, "name: Test\nhours_per_week: 200\n").unwrap();
    let report = ConfigLogic::check(&path).unwrap();
    assert!(!report.is_valid());
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("vacation_days_per_year"))
    );

    fs::write(
        &path,
        "name: Test\nhours_per_week: 200\nvacation_days_per_year: 25\ndata_directory: /tmp/x\ntimezone: Mars/Base\n",
    )
    .unwrap();
    let report = ConfigLogic::check(&path).unwrap();
    assert_eq!(report.errors.len(), 2);

    let missing = ConfigLogic::check(&dir.join("nope.conf")).unwrap_err();
    assert!(matches!(missing, AppError::ConfigMissing(_)));
}

#[test]
fn test_config_round_trip_and_validation() {
    let dir = temp_dir("config_model");
    let path = dir.join("nested").join("clockin.conf");

    let mut cfg = test_config();
    cfg.set_working_days(&["mon".into(), "Tuesday".into(), "wed".into()])
        .unwrap();
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.working_days_count(), 3);
    assert!(loaded.is_working_day(d("2025-01-08")));
    assert!(!loaded.is_working_day(d("2025-01-09")));
    assert_eq!(loaded.daily_target_ms(), 40 * 3_600_000 / 3);

    assert!(matches!(
        cfg.set_working_days(&["someday".into()]),
        Err(AppError::Config(_))
    ));

    let bad = Config {
        hours_per_week: 0.0,
        timezone: "Nowhere/City".into(),
        ..test_config()
    };
    assert_eq!(bad.problems().len(), 2);

    assert!(matches!(
        Config::load_from(&dir.join("missing.conf")),
        Err(AppError::ConfigMissing(_))
    ));
}
