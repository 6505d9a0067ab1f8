//! Calendar-date primitives shared by recurrence expansion and habit analytics.

mod arith;
mod date;

pub use arith::{
    add_days, add_months, add_weeks, add_years, days_between, days_in_month, is_leap_year,
    next_weekday_after, weekday_from_sunday_index, with_day_clamped,
};
pub use date::parse_date;
