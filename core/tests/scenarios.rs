//! End-to-end scheduling scenarios with small, hand-built workforces.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use roster_core::{
    calendar::Cell,
    config::RosterConfig,
    engine::schedule_month,
    event::{Phase, RosterEvent},
    output::write_schedule,
    types::{Scope, Slot},
    worker::{WeekdayAvailability, Worker, WorkerTable, Workforce},
};
use std::collections::HashSet;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn worker(name: &str, availability: WeekdayAvailability, ops: bool) -> Worker {
    Worker {
        name: name.into(),
        availability,
        day_start: hm(7, 0),
        day_finish: hm(18, 0),
        ops_eligible: ops,
    }
}

fn crew(prefix: &str, n: usize, ops: bool) -> Vec<Worker> {
    (0..n)
        .map(|i| worker(&format!("{prefix}{i:02}"), WeekdayAvailability::all(), ops))
        .collect()
}

fn workforce(workers: impl IntoIterator<Item = Worker>) -> Workforce {
    let _ = env_logger::builder().is_test(true).try_init();
    Workforce {
        workers: workers.into_iter().collect::<WorkerTable>(),
        ..Default::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn placed_names(report: &roster_core::engine::RosterReport) -> HashSet<String> {
    report.calendar.assignments().map(|(_, _, w)| w.to_string()).collect()
}

#[test]
fn single_working_day_is_fully_staffed() {
    // February 2026 starts on a Sunday. Every weekday except Monday the
    // 2nd is a holiday, so exactly one day needs staff.
    let holidays: HashSet<_> = (3..=28)
        .map(|d| date(2026, 2, d))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect();
    let monday = WeekdayAvailability::only(Weekday::Mon);
    let people = workforce([
        worker("Dana", monday, false),
        worker("Drew", monday, false),
        worker("Olga", monday, true),
        worker("Omar", monday, true),
    ]);

    let report = schedule_month(2026, 2, &holidays, &people, &RosterConfig::default(), 7).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.failures().count(), 0);

    let working = report.calendar.day(date(2026, 2, 2)).unwrap();
    assert!(working.cells().iter().all(|c| matches!(c, Cell::Assigned(_))));
    assert_eq!(placed_names(&report).len(), 4);

    for day in report.calendar.days().filter(|d| d.date != date(2026, 2, 2)) {
        if day.is_holiday {
            assert!(day.cells().iter().all(|c| *c == Cell::Holiday), "{}", day.date);
        } else {
            assert!(!day.is_weekday);
            assert!(day.cells().iter().all(Cell::is_empty), "{}", day.date);
        }
    }
}

#[test]
fn no_ops_workers_exhausts_retry_cap_but_still_writes_output() {
    let people = workforce(crew("duty", 60, false));
    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 11)
        .unwrap();

    assert!(report.calendar.is_complete(Scope::Duty));
    assert!(!report.calendar.is_complete(Scope::Operations));
    assert!(report.events.contains(&RosterEvent::CompletenessFailure {
        phase: Phase::Operations,
        scope: Scope::Operations,
        unfilled: 42,
        iterations: Some(100),
    }));
    assert!(report
        .failures()
        .any(|e| matches!(e, RosterEvent::CompletenessFailure { phase: Phase::FinalCheck, .. })));

    let mut buf = Vec::new();
    write_schedule(&report.calendar, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let working_rows: Vec<_> = text.lines().skip(1).filter(|l| l.contains(",1,0,")).collect();
    assert_eq!(working_rows.len(), 21);
    for line in working_rows {
        let cols: Vec<_> = line.split(',').collect();
        assert_eq!(cols[4], "NONE", "{line}");
        assert_eq!(cols[6], "NONE", "{line}");
        assert_ne!(cols[3], "NONE", "{line}");
        assert_ne!(cols[5], "NONE", "{line}");
    }
}

#[test]
fn retry_cap_follows_config() {
    let people = workforce(crew("duty", 60, false));
    let config = RosterConfig { ops_retry_limit: 3, ..Default::default() };
    let report = schedule_month(2025, 3, &HashSet::new(), &people, &config, 11).unwrap();
    assert!(report.failures().any(|e| matches!(
        e,
        RosterEvent::CompletenessFailure { phase: Phase::Operations, iterations: Some(3), .. }
    )));
}

#[test]
fn unavailable_force_include_is_warned_and_dropped() {
    let mut people = workforce(
        crew("duty", 50, false)
            .into_iter()
            .chain(crew("ops", 50, true))
            .chain([worker("Ghost", WeekdayAvailability::none(), false)]),
    );
    people.lists.force_include.push("Ghost".into());

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 3)
        .unwrap();

    assert!(report.warnings().any(|e| matches!(
        e,
        RosterEvent::PlacementWarning { phase: Phase::ForceInclude, worker, .. } if worker == "Ghost"
    )));
    assert!(!placed_names(&report).contains("Ghost"));
    assert!(report.is_complete());
}

#[test]
fn unknown_force_include_name_is_warned() {
    let mut people = workforce(crew("duty", 50, false).into_iter().chain(crew("ops", 50, true)));
    people.lists.force_include.push("Nobody".into());

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 3)
        .unwrap();
    assert_eq!(report.warnings().count(), 1);
}

#[test]
fn force_includes_get_first_pick_last_listed_first() {
    let mut people = workforce(
        crew("duty", 50, false)
            .into_iter()
            .chain(crew("ops", 50, true))
            .chain([
                worker("First", WeekdayAvailability::all(), false),
                worker("Second", WeekdayAvailability::all(), false),
            ]),
    );
    people.lists.force_include = vec!["First".into(), "Second".into()];

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 5)
        .unwrap();

    // 2025-03-03 is the first Monday of the month.
    let day = report.calendar.day(date(2025, 3, 3)).unwrap();
    assert_eq!(day.cell(Slot::EarlyDuty).worker(), Some("Second"));
    assert_eq!(day.cell(Slot::LateDuty).worker(), Some("First"));
}

#[test]
fn skipped_workers_are_never_drawn() {
    let mut people = workforce(crew("duty", 30, false).into_iter().chain(crew("ops", 50, true)));
    people.lists.skip = (0..5).map(|i| format!("duty{i:02}")).collect();

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 9)
        .unwrap();

    let placed = placed_names(&report);
    for skipped in &people.lists.skip {
        assert!(!placed.contains(skipped), "{skipped} was skipped but placed");
    }
    // 25 drawable duty workers for 42 duty slots.
    assert!(report.failures().any(|e| matches!(
        e,
        RosterEvent::CompletenessFailure { phase: Phase::FallbackDuty, scope: Scope::Duty, unfilled: 17, .. }
    )));
    // Operations is still attempted and filled.
    assert!(report.calendar.is_complete(Scope::Operations));
}

#[test]
fn fairness_draw_prefers_those_who_did_not_serve_last_period() {
    let mut people = workforce(
        crew("fresh", 42, false)
            .into_iter()
            .chain(crew("served", 10, false))
            .chain(crew("ops", 50, true)),
    );
    people.lists.served_last_period = (0..10).map(|i| format!("served{i:02}")).collect();

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 21)
        .unwrap();

    assert!(report.is_complete());
    let placed = placed_names(&report);
    assert!(placed.iter().all(|n| !n.starts_with("served")));
    assert_eq!(placed.iter().filter(|n| n.starts_with("fresh")).count(), 42);
}

#[test]
fn fallback_draw_tops_up_from_last_period() {
    let mut people = workforce(
        crew("fresh", 30, false)
            .into_iter()
            .chain(crew("served", 20, false))
            .chain(crew("ops", 50, true)),
    );
    people.lists.served_last_period = (0..20).map(|i| format!("served{i:02}")).collect();

    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 21)
        .unwrap();

    assert!(report.is_complete());
    let placed = placed_names(&report);
    assert_eq!(placed.iter().filter(|n| n.starts_with("fresh")).count(), 30);
    assert_eq!(placed.iter().filter(|n| n.starts_with("served")).count(), 12);

    let fallback_placements = report
        .events
        .iter()
        .filter(|e| matches!(e, RosterEvent::WorkerPlaced { phase: Phase::FallbackDuty, .. }))
        .count();
    assert_eq!(fallback_placements, 12);
}

#[test]
fn operations_fill_in_one_pass_when_staff_suffices() {
    let people = workforce(crew("duty", 50, false).into_iter().chain(crew("ops", 50, true)));
    let report = schedule_month(2025, 3, &HashSet::new(), &people, &RosterConfig::default(), 1)
        .unwrap();

    assert!(report.is_complete());
    assert!(report.events.iter().any(|e| matches!(
        e,
        RosterEvent::PhaseCompleted { phase: Phase::Operations, placed: 42, remaining: 8 }
    )));
}

#[test]
fn invalid_month_is_rejected_before_scheduling() {
    let people = workforce(crew("duty", 2, false));
    assert!(schedule_month(2025, 13, &HashSet::new(), &people, &RosterConfig::default(), 1).is_err());
}
