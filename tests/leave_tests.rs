use clockin::clock::FixedClock;
use clockin::core::entries::EntryManager;
use clockin::core::leave::parse_day_count;
use clockin::core::overlap::{Span, find_overlaps};
use clockin::core::sick::SickManager;
use clockin::core::vacation::VacationManager;
use clockin::errors::{AppError, Conflict};
use clockin::models::{LeaveEntry, LeaveKind};
use clockin::storage::Stores;
use clockin::utils::time::parse_time;

mod common;
use common::{d, store_counts, test_config, utc};

fn clock() -> FixedClock {
    // Wednesday
    FixedClock::at(utc("2025-01-08T12:00:00Z"))
}

#[test]
fn test_vacation_skips_weekend() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    // Thursday, 3 days → Thu, Fri, Mon
    let entry = VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(3, Some(d("2025-01-09")), None)
        .unwrap();

    assert_eq!(entry.start_date, d("2025-01-09"));
    assert_eq!(entry.end_date, d("2025-01-13"));
    assert_eq!(entry.days, 3);
    assert_eq!(entry.description, "3 vacation days");
    assert_eq!(stores.vacation.load_all().unwrap().len(), 1);
}

#[test]
fn test_vacation_on_weekend_moves_to_monday() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    let entry = VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(1, Some(d("2025-01-11")), Some("long weekend".into()))
        .unwrap();

    assert_eq!(entry.start_date, d("2025-01-13"));
    assert_eq!(entry.end_date, d("2025-01-13"));
    assert_eq!(entry.description, "long weekend");
}

#[test]
fn test_vacation_without_working_days_fails() {
    let mut cfg = test_config();
    cfg.set_working_days(&[]).unwrap();
    let mut stores = Stores::in_memory();
    let clock = clock();

    let err = VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(2, Some(d("2025-01-09")), None)
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.is_user_facing());
    assert!(stores.vacation.load_all().unwrap().is_empty());
}

#[test]
fn test_vacation_range_counts_working_days() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();
    let mut mgr = VacationManager::new(&cfg, &mut stores, &clock);

    let entry = mgr
        .add_vacation_range(d("2025-01-10"), d("2025-01-14"), None)
        .unwrap()
        .expect("range holds working days");
    assert_eq!(entry.days, 3);
    assert_eq!(entry.start_date, d("2025-01-10"));
    assert_eq!(entry.end_date, d("2025-01-14"));

    // Saturday and Sunday only
    let none = mgr
        .add_vacation_range(d("2025-01-18"), d("2025-01-19"), None)
        .unwrap();
    assert!(none.is_none());

    assert!(mgr.add_vacation_range(d("2025-01-20"), d("2025-01-19"), None).is_err());
    assert_eq!(mgr.total_vacation_days().unwrap(), 3);
}

#[test]
fn test_remaining_vacation_days() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();
    let mut mgr = VacationManager::new(&cfg, &mut stores, &clock);

    mgr.add_vacation(3, Some(d("2025-01-09")), None).unwrap();
    mgr.add_vacation(2, Some(d("2025-02-03")), None).unwrap();

    assert_eq!(mgr.total_vacation_days().unwrap(), 5);
    assert_eq!(mgr.remaining_vacation_days().unwrap(), 20.0);
    assert_eq!(mgr.entries().unwrap()[0].start_date, d("2025-01-09"));
}

#[test]
fn test_sick_counts_calendar_days() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    // Thursday, 3 days → Thu, Fri, Sat
    let entry = SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(3, None, Some(d("2025-01-09")))
        .unwrap();

    assert_eq!(entry.start_date, d("2025-01-09"));
    assert_eq!(entry.end_date, d("2025-01-11"));
    assert_eq!(entry.days, 3);
    assert_eq!(entry.description, "3 sick days");
}

#[test]
fn test_sick_defaults_to_today() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    let entry = SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(1, Some("flu".into()), None)
        .unwrap();

    assert_eq!(entry.start_date, d("2025-01-08"));
    assert_eq!(entry.end_date, d("2025-01-08"));
    assert_eq!(entry.description, "flu");
}

#[test]
fn test_sick_works_without_working_days() {
    let mut cfg = test_config();
    cfg.set_working_days(&[]).unwrap();
    let mut stores = Stores::in_memory();
    let clock = clock();

    let mut mgr = SickManager::new(&cfg, &mut stores, &clock);
    let entry = mgr.add_sick_days(2, None, Some(d("2025-01-11"))).unwrap();
    assert_eq!(entry.end_date, d("2025-01-12"));
    assert_eq!(mgr.total_sick_days().unwrap(), 2);
}

#[test]
fn test_sick_on_vacation_is_rejected() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(3, Some(d("2025-01-09")), None)
        .unwrap();

    let err = SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(1, None, Some(d("2025-01-10")))
        .unwrap_err();

    match &err {
        AppError::Overlap { with, dates } => {
            assert_eq!(*with, Conflict::Leave(LeaveKind::Vacation));
            assert_eq!(dates, &vec![d("2025-01-10")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Overlaps with existing vacation leave on: 2025-01-10"
    );
    assert!(stores.sick.load_all().unwrap().is_empty());
}

#[test]
fn test_vacation_twice_on_same_day_is_rejected() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();
    let mut mgr = VacationManager::new(&cfg, &mut stores, &clock);

    mgr.add_vacation(2, Some(d("2025-01-09")), None).unwrap();
    let err = mgr.add_vacation(1, Some(d("2025-01-10")), None).unwrap_err();
    assert!(matches!(
        err,
        AppError::Overlap {
            with: Conflict::Leave(LeaveKind::Vacation),
            ..
        }
    ));
    assert_eq!(mgr.total_vacation_days().unwrap(), 2);
}

#[test]
fn test_other_leave_kind_is_checked_first() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(1, Some(d("2025-01-16")), None)
        .unwrap();
    SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(1, None, Some(d("2025-01-15")))
        .unwrap();

    // New vacation over Wed 15 (sick) and Thu 16 (vacation): sick wins.
    let err = VacationManager::new(&cfg, &mut stores, &clock)
        .add_vacation(2, Some(d("2025-01-15")), None)
        .unwrap_err();
    match err {
        AppError::Overlap { with, dates } => {
            assert_eq!(with, Conflict::Leave(LeaveKind::Sick));
            assert_eq!(dates, vec![d("2025-01-15")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_leave_on_time_entry_is_rejected() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();

    EntryManager::new(&cfg, &mut stores, &clock)
        .add_entry(
            d("2025-01-06"),
            parse_time("08:00").unwrap(),
            parse_time("16:00").unwrap(),
            30.0,
            None,
        )
        .unwrap();

    let err = SickManager::new(&cfg, &mut stores, &clock)
        .add_sick_days(2, None, Some(d("2025-01-05")))
        .unwrap_err();
    match err {
        AppError::Overlap { with, dates } => {
            assert_eq!(with, Conflict::TimeEntry);
            assert_eq!(dates, vec![d("2025-01-06")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store_counts(&stores), [1, 0, 0, 0]);
}

#[test]
fn test_sick_leave_is_capped() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    let clock = clock();
    let mut mgr = SickManager::new(&cfg, &mut stores, &clock);

    let err = mgr
        .add_sick_days(4_000_000_000, None, Some(d("2025-01-06")))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("limited to 365 days"));

    mgr.add_sick_days(365, None, Some(d("2025-01-06"))).unwrap();
    drop(mgr);
    assert_eq!(store_counts(&stores), [0, 0, 1, 0]);
}

#[test]
fn test_totals_saturate_on_huge_day_counts() {
    let cfg = test_config();
    let mut stores = Stores::in_memory();
    for (id, start) in [("v1", "2030-01-01"), ("v2", "2031-01-01")] {
        stores
            .vacation
            .append(LeaveEntry {
                id: id.to_string(),
                start_date: d(start),
                end_date: d(start),
                days: u32::MAX - 1,
                description: "hand edited".to_string(),
            })
            .unwrap();
    }
    let clock = clock();
    let mgr = VacationManager::new(&cfg, &mut stores, &clock);
    assert_eq!(mgr.total_vacation_days().unwrap(), u32::MAX);
    assert_eq!(mgr.remaining_vacation_days().unwrap(), 0.0);
}

#[test]
fn test_find_overlaps_reports_each_date_once() {
    let spans = [
        Span::new(d("2025-01-06"), d("2025-01-08")),
        Span::day(d("2025-01-07")),
    ];
    let candidates = [d("2025-01-05"), d("2025-01-07"), d("2025-01-08"), d("2025-01-09")];
    assert_eq!(
        find_overlaps(&candidates, &spans),
        vec![d("2025-01-07"), d("2025-01-08")]
    );
    assert!(find_overlaps(&candidates, &[]).is_empty());
}

#[test]
fn test_parse_day_count() {
    assert_eq!(parse_day_count("3").unwrap(), 3);
    assert_eq!(parse_day_count(" 2.0 ").unwrap(), 2);

    for bad in ["0", "-1", "2.5", "abc", "", "NaN"] {
        let err = parse_day_count(bad).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{bad} accepted");
    }
    assert!(
        parse_day_count("2.5")
            .unwrap_err()
            .to_string()
            .contains("whole number")
    );
}
