//! Single-step advancement of a rule's cursor.

use chrono::NaiveDate;

use super::{Frequency, RecurringRule};
use crate::calendar::{
    add_days, add_months, add_weeks, add_years, next_weekday_after, with_day_clamped,
};

/// ## Summary
/// Returns the occurrence that follows `cursor` under `rule`.
///
/// - daily: the next day.
/// - weekly: the next anchored weekday strictly after `cursor`, or seven days later.
/// - bi-weekly: the anchored weekday search starts from `cursor + 7 days`, or
///   fourteen days later when unanchored.
/// - monthly: one month later (day-of-month clamped to the month's length),
///   then the anchored day-of-month, clamped to the last day of that month.
/// - yearly: one year later.
///
/// Returns `None` when the next date is not representable.
#[must_use]
pub fn next_occurrence(cursor: NaiveDate, rule: &RecurringRule) -> Option<NaiveDate> {
    match rule.frequency() {
        Frequency::Daily => add_days(cursor, 1),
        Frequency::Weekly => match rule.weekday_anchor() {
            Some(weekday) => next_weekday_after(cursor, weekday),
            None => add_weeks(cursor, 1),
        },
        Frequency::BiWeekly => match rule.weekday_anchor() {
            Some(weekday) => next_weekday_after(add_weeks(cursor, 1)?, weekday),
            None => add_weeks(cursor, 2),
        },
        Frequency::Monthly => {
            let advanced = add_months(cursor, 1)?;
            match rule.month_day_anchor() {
                Some(day) => with_day_clamped(advanced, day),
                None => Some(advanced),
            }
        }
        Frequency::Yearly => add_years(cursor, 1),
    }
}
