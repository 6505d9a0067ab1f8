//! Forecasting persisted rules end to end, from JSON records to an agenda.

use cadence_test::calendar::EngineError;
use cadence_test::calendar::recurrence::RecurringRuleRecord;
use cadence_test::config::Settings;
use cadence_test::service::error::ServiceError;
use cadence_test::service::forecast::{ForecastService, upcoming};

use super::helpers::date;

fn records() -> Vec<RecurringRuleRecord> {
    serde_json::from_str(
        r#"[
            {
                "id": "00000000-0000-0000-0000-00000000000a",
                "label": "Rent",
                "frequency": "monthly",
                "occurrence_day": 31,
                "start_date": "2024-01-31"
            },
            {
                "id": "00000000-0000-0000-0000-00000000000b",
                "label": "Payroll",
                "frequency": "bi-weekly",
                "occurrence_day": 5,
                "start_date": "2024-01-05",
                "end_date": "2024-03-01"
            },
            {
                "id": "00000000-0000-0000-0000-00000000000c",
                "label": "Broken",
                "frequency": "weekly",
                "start_date": "2024-02-31"
            },
            {
                "id": "00000000-0000-0000-0000-00000000000d",
                "label": "Insurance",
                "frequency": "yearly",
                "occurrence_day": 15,
                "start_date": "2023-02-20"
            }
        ]"#,
    )
    .expect("valid json")
}

#[test_log::test]
fn forecast_from_persisted_records() {
    let settings = Settings::from_toml_str("").expect("default settings");
    let service = ForecastService::from_settings(&settings).expect("valid settings");

    let forecasts = service
        .forecast_str(&records(), "2024-02-01", "2024-03-31")
        .expect("valid window");

    assert_eq!(
        forecasts[0].outcome,
        Ok(vec![date(2024, 2, 29), date(2024, 3, 31)])
    );
    assert_eq!(
        forecasts[1].outcome,
        Ok(vec![date(2024, 2, 2), date(2024, 2, 16), date(2024, 3, 1)])
    );
    assert!(matches!(
        &forecasts[2].outcome,
        Err(ServiceError::EngineError(EngineError::Validation { field, .. })) if field == "start_date"
    ));
    assert_eq!(forecasts[3].outcome, Ok(vec![date(2024, 2, 20)]));

    let agenda = upcoming(&forecasts);
    let labels: Vec<(String, &str)> = agenda
        .iter()
        .map(|entry| (entry.date.to_string(), entry.label.as_deref().unwrap_or("")))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("2024-02-02".to_string(), "Payroll"),
            ("2024-02-16".to_string(), "Payroll"),
            ("2024-02-20".to_string(), "Insurance"),
            ("2024-02-29".to_string(), "Rent"),
            ("2024-03-01".to_string(), "Payroll"),
            ("2024-03-31".to_string(), "Rent"),
        ]
    );
}

#[test]
fn agenda_json_uses_calendar_dates() {
    let forecasts = ForecastService::default()
        .forecast(&records()[..1], date(2024, 2, 1), date(2024, 2, 29))
        .expect("valid window");
    let json = serde_json::to_string(&upcoming(&forecasts)).expect("serialize");
    assert_eq!(
        json,
        r#"[{"date":"2024-02-29","rule_id":"00000000-0000-0000-0000-00000000000a","label":"Rent"}]"#
    );
}

#[test]
fn oversized_window_is_rejected_before_expansion() {
    let settings =
        Settings::from_toml_str("[expansion]\nmax_window_days = 90\n").expect("valid settings");
    let service = ForecastService::from_settings(&settings).expect("valid settings");
    let err = service
        .forecast(&records(), date(2024, 1, 1), date(2024, 12, 31))
        .expect_err("window too wide");
    assert_eq!(
        err,
        ServiceError::WindowTooWide {
            days: 366,
            max_days: 90,
        }
    );
}
