//! Day, week, month and year arithmetic on calendar dates.
//!
//! Every operation returns `None` instead of panicking when the result would
//! fall outside the range chrono can represent.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

#[must_use]
pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

#[must_use]
pub fn add_weeks(date: NaiveDate, weeks: u32) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(7)?)
}

/// Adds calendar months, keeping the day-of-month and clamping it to the
/// length of the target month (2024-01-31 + 1 month = 2024-02-29).
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Adds calendar years. February 29 clamps to February 28 in common years.
#[must_use]
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

/// Whole calendar days from `earlier` to `later` (negative if `later` is earlier).
#[must_use]
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// ## Summary
/// Sets the day-of-month, clamping to the last day of the date's month.
///
/// Day 31 applied to any day in February 2024 yields 2024-02-29, never a
/// date in March.
#[must_use]
pub fn with_day_clamped(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(date.year(), date.month());
    date.with_day(day.clamp(1, last))
}

/// ## Summary
/// Returns the first date strictly after `date` that falls on `weekday`.
///
/// If `date` already falls on `weekday` the result is one full week later.
#[must_use]
pub fn next_weekday_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = date.weekday().num_days_from_sunday();
    let target = weekday.num_days_from_sunday();
    let ahead = match (7 + target - current) % 7 {
        0 => 7,
        n => n,
    };
    add_days(date, ahead)
}

/// Maps a weekday index counted from Sunday (0 = Sunday .. 6 = Saturday).
#[must_use]
pub const fn weekday_from_sunday_index(index: u32) -> Option<Weekday> {
    Some(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => return None,
    })
}
