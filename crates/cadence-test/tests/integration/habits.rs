//! Habit dashboard end to end, from JSON records to rendered metrics.

use cadence_test::calendar::consistency::HabitRecord;
use cadence_test::config::Settings;
use cadence_test::service::habits::HabitService;

use super::helpers::{date, minus_days};

fn record_json(id: u8, target: u8, days: &[chrono::NaiveDate]) -> serde_json::Value {
    serde_json::json!({
        "id": format!("00000000-0000-0000-0000-0000000000{id:02x}"),
        "target_per_week": target,
        "logs": days
            .iter()
            .map(|day| serde_json::json!({ "completed_date": day.to_string() }))
            .collect::<Vec<_>>(),
    })
}

#[test_log::test]
fn dashboard_over_a_snapshot() {
    let today = date(2024, 3, 6);
    let mut daily_days: Vec<_> = (0..20).map(|n| minus_days(today, n)).collect();
    daily_days.extend_from_slice(&[today, minus_days(today, 1)]);

    let snapshot = serde_json::Value::Array(vec![
        record_json(1, 7, &daily_days),
        record_json(2, 2, &[minus_days(today, 2), minus_days(today, 9)]),
    ]);
    let records: Vec<HabitRecord> = serde_json::from_value(snapshot).expect("valid records");

    let settings = Settings::from_toml_str("").expect("default settings");
    let service = HabitService::from_settings(&settings).expect("valid settings");
    let reports = service.dashboard(&records, today);

    let daily = reports[0].outcome.as_ref().expect("valid habit");
    assert_eq!(daily.stats.streak, 20);
    assert_eq!(daily.stats.completion_rate, 100);
    assert_eq!(daily.longest_streak, 20);
    // 2024-03-06 is a Wednesday: Monday through Wednesday logged
    assert_eq!(daily.week.completed, 3);
    assert!(!daily.week.met);

    let lapsed = reports[1].outcome.as_ref().expect("valid habit");
    assert_eq!(lapsed.stats.streak, 0);
    assert_eq!(lapsed.stats.completion_rate, 14);
    assert_eq!(lapsed.week.completed, 1);
}

#[test]
fn duplicates_in_the_snapshot_do_not_change_metrics() {
    let today = date(2024, 3, 6);
    let days = [today, minus_days(today, 1), minus_days(today, 4)];
    let mut doubled = days.to_vec();
    doubled.extend_from_slice(&days);
    doubled.reverse();

    let records: Vec<HabitRecord> = serde_json::from_value(serde_json::Value::Array(vec![
        record_json(1, 3, &days),
        record_json(2, 3, &doubled),
    ]))
    .expect("valid records");

    let reports = HabitService::default().dashboard(&records, today);
    let once = reports[0].outcome.as_ref().expect("valid habit");
    let twice = reports[1].outcome.as_ref().expect("valid habit");
    assert_eq!(once.stats, twice.stats);
    assert_eq!(once.week, twice.week);
    assert_eq!(once.stats.streak, 2);
}
