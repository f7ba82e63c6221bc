use chrono::Duration;

use clockin::clock::FixedClock;
use clockin::config::Config;
use clockin::core::calculator::pause::{suggest_pause, target_daily_minutes};
use clockin::core::entries::EntryManager;
use clockin::core::session::{SessionManager, snapshot};
use clockin::core::sick::SickManager;
use clockin::core::vacation::VacationManager;
use clockin::errors::{AppError, Conflict};
use clockin::models::{LeaveEntry, LeaveKind, WorkSession};
use clockin::storage::Stores;
use clockin::ui::prompt::{AutoConfirm, ScriptedPrompter};
use clockin::utils::time::parse_time;

mod common;
use common::{d, store_counts, test_config, utc};

fn config_37_5() -> Config {
    Config {
        hours_per_week: 37.5,
        ..test_config()
    }
}

#[test]
fn test_daily_target_and_suggestion() {
    let cfg = config_37_5();
    assert_eq!(target_daily_minutes(&cfg), Some(450));
    assert_eq!(suggest_pause(500.0, Some(450)), 50);
    assert_eq!(suggest_pause(449.0, Some(450)), 0);
    assert_eq!(suggest_pause(500.9, Some(450)), 50);
    assert_eq!(suggest_pause(500.0, None), 0);

    let mut none = test_config();
    none.set_working_days(&[]).unwrap();
    assert_eq!(target_daily_minutes(&none), None);
}

#[test]
fn test_stop_accepting_suggested_pause() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T16:20:00Z"));

    let mut prompter = ScriptedPrompter::new(["y"]);
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, Some("release".into()))
        .unwrap();

    assert_eq!(prompter.asked.len(), 1);
    assert_eq!(report.suggested_pause_minutes, 50);
    assert!(report.suggestion_applied);
    assert_eq!(report.entry.pause_time, 50.0);
    assert_eq!(report.entry.date, d("2025-01-06"));
    assert_eq!(report.entry.working_ms(), 450 * 60_000);
    assert_eq!(report.entry.description.as_deref(), Some("release"));

    assert!(stores.session.load().unwrap().is_none());
    assert_eq!(stores.time.load_all().unwrap().len(), 1);
}

#[test]
fn test_stop_declining_keeps_tracked_pause() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T16:20:00Z"));

    let mut prompter = ScriptedPrompter::new(["n"]);
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();

    assert!(!report.suggestion_applied);
    assert_eq!(report.entry.pause_time, 0.0);
    assert_eq!(report.entry.working_ms(), 500 * 60_000);
}

#[test]
fn test_stop_empty_answer_accepts() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.advance(Duration::minutes(500));

    let mut prompter = ScriptedPrompter::new([""]);
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();
    assert!(report.suggestion_applied);
    assert_eq!(report.entry.pause_time, 50.0);
}

#[test]
fn test_pause_and_resume_accumulate() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();

    clock.set(utc("2025-01-06T12:00:00Z"));
    let paused = SessionManager::new(&cfg, &mut stores, &clock).pause().unwrap();
    assert!(paused.is_paused);
    assert_eq!(paused.pause_start_time, Some(utc("2025-01-06T12:00:00Z")));

    clock.set(utc("2025-01-06T12:30:00Z"));
    let resumed = SessionManager::new(&cfg, &mut stores, &clock).resume().unwrap();
    assert!(!resumed.is_paused);
    assert_eq!(resumed.pause_start_time, None);
    assert_eq!(resumed.paused_time_ms, 30 * 60_000);

    // Suggestion (50) exceeds the tracked pause (30): asked, declined.
    clock.set(utc("2025-01-06T16:20:00Z"));
    let mut prompter = AutoConfirm(false);
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();
    assert_eq!(report.tracked_pause_minutes, 30.0);
    assert_eq!(report.entry.pause_time, 30.0);
    assert_eq!(report.entry.working_ms(), 470 * 60_000);
}

#[test]
fn test_no_prompt_when_tracked_pause_suffices() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T12:00:00Z"));
    SessionManager::new(&cfg, &mut stores, &clock).pause().unwrap();
    clock.set(utc("2025-01-06T13:00:00Z"));
    SessionManager::new(&cfg, &mut stores, &clock).resume().unwrap();

    clock.set(utc("2025-01-06T16:20:00Z"));
    let mut prompter = ScriptedPrompter::default();
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();

    assert!(prompter.asked.is_empty());
    assert_eq!(report.entry.pause_time, 60.0);
}

#[test]
fn test_stop_while_paused_folds_open_pause() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T11:00:00Z"));
    SessionManager::new(&cfg, &mut stores, &clock).pause().unwrap();
    clock.set(utc("2025-01-06T11:15:00Z"));

    let mut prompter = ScriptedPrompter::default();
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();

    assert!(prompter.asked.is_empty());
    assert_eq!(report.entry.pause_time, 15.0);
    assert_eq!(report.entry.working_ms(), 3 * 3_600_000);
}

#[test]
fn test_no_prompt_without_working_days() {
    let mut cfg = config_37_5();
    cfg.set_working_days(&[]).unwrap();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T20:00:00Z"));

    let mut prompter = ScriptedPrompter::default();
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut prompter, None)
        .unwrap();
    assert!(prompter.asked.is_empty());
    assert_eq!(report.suggested_pause_minutes, 0);
    assert_eq!(report.entry.pause_time, 0.0);
}

#[test]
fn test_state_machine_errors() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));
    let mut mgr = SessionManager::new(&cfg, &mut stores, &clock);

    assert!(matches!(mgr.pause(), Err(AppError::NoSession)));
    assert!(matches!(mgr.resume(), Err(AppError::NoSession)));
    assert!(matches!(
        mgr.stop(&mut AutoConfirm(true), None),
        Err(AppError::NoSession)
    ));

    mgr.start().unwrap();
    match mgr.start() {
        Err(AppError::SessionActive(started)) => assert_eq!(started, "2025-01-06 08:00"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(mgr.resume(), Err(AppError::NotPaused)));
    mgr.pause().unwrap();
    assert!(matches!(mgr.pause(), Err(AppError::AlreadyPaused)));
    assert!(mgr.current().unwrap().is_some());
}

#[test]
fn test_cannot_start_on_sick_day() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(1, None, None)
        .unwrap();

    let err = SessionManager::new(&cfg, &mut stores, &clock)
        .start()
        .unwrap_err();
    match err {
        AppError::LeaveDay { date, kind } => {
            assert_eq!(date, d("2025-01-06"));
            assert_eq!(kind, LeaveKind::Sick);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(stores.session.load().unwrap().is_none());
    assert_eq!(store_counts(&stores), [0, 0, 1, 0]);
}

#[test]
fn test_cannot_start_on_vacation_day() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-07T08:00:00Z"));

    VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(2, Some(d("2025-01-06")), None)
        .unwrap();

    let err = SessionManager::new(&cfg, &mut stores, &clock)
        .start()
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::LeaveDay {
            kind: LeaveKind::Vacation,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Cannot track work on 2025-01-07: it is a vacation day"
    );
    assert!(stores.session.load().unwrap().is_none());
    assert_eq!(store_counts(&stores), [0, 1, 0, 0]);
}

#[test]
fn test_running_session_blocks_leave_for_its_day() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();

    let err = VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(1, Some(d("2025-01-06")), None)
        .unwrap_err();
    match &err {
        AppError::Overlap { with, dates } => {
            assert_eq!(*with, Conflict::Session);
            assert_eq!(dates, &vec![d("2025-01-06")]);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Overlaps with existing running work session on: 2025-01-06"
    );
    assert!(matches!(
        SickManager::new(&cfg, &mut stores, &clock).add_sick_days(2, None, None),
        Err(AppError::Overlap {
            with: Conflict::Session,
            ..
        })
    ));

    // Other days stay free.
    VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(1, Some(d("2025-01-07")), None)
        .unwrap();
    assert_eq!(store_counts(&stores), [0, 1, 0, 0]);

    clock.set(utc("2025-01-06T16:00:00Z"));
    let report = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut AutoConfirm(false), None)
        .unwrap();
    assert_eq!(report.entry.date, d("2025-01-06"));
    assert_eq!(store_counts(&stores), [1, 1, 0, 0]);
}

#[test]
fn test_stop_refuses_when_leave_covers_the_session_day() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    // Written behind the manager's back, e.g. by editing vacation.csv.
    stores
        .vacation
        .append(LeaveEntry {
            id: "v1".to_string(),
            start_date: d("2025-01-06"),
            end_date: d("2025-01-06"),
            days: 1,
            description: "1 vacation day".to_string(),
        })
        .unwrap();

    clock.set(utc("2025-01-06T16:00:00Z"));
    let err = SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut AutoConfirm(true), None)
        .unwrap_err();
    match err {
        AppError::LeaveDay { date, kind } => {
            assert_eq!(date, d("2025-01-06"));
            assert_eq!(kind, LeaveKind::Vacation);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(stores.session.load().unwrap().is_some());
    assert_eq!(store_counts(&stores), [0, 1, 0, 0]);
}

#[test]
fn test_session_may_share_a_day_with_a_manual_entry() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T13:00:00Z"));

    EntryManager::new(&cfg, &mut stores, &clock)
        .add_entry(
            d("2025-01-06"),
            parse_time("07:00").unwrap(),
            parse_time("11:00").unwrap(),
            0.0,
            None,
        )
        .unwrap();

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T15:00:00Z"));
    SessionManager::new(&cfg, &mut stores, &clock)
        .stop(&mut AutoConfirm(true), None)
        .unwrap();

    assert_eq!(stores.time.load_all().unwrap().len(), 2);
}

#[test]
fn test_timer_snapshot() {
    let cfg = config_37_5();
    let mut stores = Stores::in_memory();
    let clock = FixedClock::at(utc("2025-01-06T08:00:00Z"));

    assert!(
        SessionManager::new(&cfg, &mut stores, &clock)
            .snapshot()
            .unwrap()
            .is_none()
    );

    SessionManager::new(&cfg, &mut stores, &clock).start().unwrap();
    clock.set(utc("2025-01-06T10:00:00Z"));
    SessionManager::new(&cfg, &mut stores, &clock).pause().unwrap();
    clock.set(utc("2025-01-06T10:20:00Z"));

    let snap = SessionManager::new(&cfg, &mut stores, &clock)
        .snapshot()
        .unwrap()
        .expect("running session");
    assert!(snap.is_paused);
    assert_eq!(snap.elapsed_ms, 2 * 3_600_000);
    assert_eq!(snap.paused_ms, 20 * 60_000);
    assert_eq!(snap.today_worked_ms, 2 * 3_600_000);
    // 08:00 + 7h30 target + 20 min pause
    assert_eq!(snap.projected_end, Some(utc("2025-01-06T15:50:00Z")));
}

#[test]
fn test_snapshot_counts_completed_work() {
    let cfg = config_37_5();
    let session = WorkSession::new(utc("2025-01-06T13:00:00Z"));
    let now = utc("2025-01-06T14:00:00Z");

    let snap = snapshot(&cfg, &session, 4 * 3_600_000, now);
    assert_eq!(snap.today_worked_ms, 5 * 3_600_000);
    // 3h30 of the target left after the morning block.
    assert_eq!(snap.projected_end, Some(utc("2025-01-06T16:30:00Z")));

    let mut none = config_37_5();
    none.set_working_days(&[]).unwrap();
    assert_eq!(snapshot(&none, &session, 0, now).projected_end, None);
}
