//! Laws that must hold for every rule and window.

use cadence_test::calendar::recurrence::{Expander, RecurringRule, expand};
use chrono::NaiveDate;

use super::helpers::{date, plus_days, rule_matrix, windows};

fn occurrences(rule: &RecurringRule, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    expand(rule, start, end)
        .and_then(|expansion| expansion.dates())
        .unwrap_or_else(|e| panic!("{rule:?} over {start}..={end}: {e}"))
}

#[test_log::test]
fn occurrences_stay_inside_window_and_rule_bounds() {
    for rule in rule_matrix() {
        for (start, end) in windows() {
            for day in occurrences(&rule, start, end) {
                assert!(start <= day && day <= end, "{rule:?}: {day} outside window");
                assert!(day >= rule.start_date(), "{rule:?}: {day} before start");
                if let Some(end_date) = rule.end_date() {
                    assert!(day <= end_date, "{rule:?}: {day} after end_date");
                }
            }
        }
    }
}

#[test]
fn occurrences_are_strictly_increasing() {
    for rule in rule_matrix() {
        for (start, end) in windows() {
            let days = occurrences(&rule, start, end);
            assert!(
                days.windows(2).all(|pair| pair[0] < pair[1]),
                "{rule:?} over {start}..={end}: {days:?}"
            );
        }
    }
}

#[test]
fn start_date_is_emitted_when_in_window() {
    for rule in rule_matrix() {
        for (start, end) in windows() {
            let in_window = start <= rule.start_date() && rule.start_date() <= end;
            let days = occurrences(&rule, start, end);
            assert_eq!(
                days.first() == Some(&rule.start_date()),
                in_window,
                "{rule:?} over {start}..={end}"
            );
        }
    }
}

#[test]
fn splitting_the_window_does_not_change_results() {
    let a = date(2023, 10, 1);
    let c = date(2025, 3, 31);
    let split_points = [
        date(2023, 10, 1),
        date(2024, 1, 30),
        date(2024, 1, 31),
        date(2024, 2, 28),
        date(2024, 2, 29),
        date(2024, 12, 31),
        date(2025, 3, 30),
    ];

    for rule in rule_matrix() {
        let whole = occurrences(&rule, a, c);
        for b in split_points {
            let mut joined = occurrences(&rule, a, b);
            joined.extend(occurrences(&rule, plus_days(b, 1), c));
            assert_eq!(joined, whole, "{rule:?} split at {b}");
        }
    }
}

#[test]
fn expansion_is_deterministic() {
    for rule in rule_matrix() {
        let (start, end) = (date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(occurrences(&rule, start, end), occurrences(&rule, start, end));
    }
}

#[test]
fn zero_margin_guard_never_trips_for_valid_rules() {
    let expander = Expander::new().with_iteration_margin(0);
    for rule in rule_matrix() {
        for (start, end) in windows() {
            let expansion = expander.expand(&rule, start, end).expect("valid window");
            assert!(
                expansion.dates().is_ok(),
                "{rule:?} over {start}..={end} tripped the guard"
            );
        }
    }
}
