//! Streak and trailing-window completion analytics.
//!
//! All functions take the reference day (`as_of`) explicitly; nothing here
//! reads the system clock.

use std::collections::BTreeSet;

use cadence_core::constants::{MAX_TRAILING_WINDOW_DAYS, TRAILING_WINDOW_DAYS};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::Habit;
use crate::calendar::days_between;
use crate::error::{EngineError, EngineResult};

/// Consistency metrics derived from a habit's log. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct HabitStats {
    pub streak: u32,
    /// Percentage of days in the trailing window with a completion, 0..=100.
    pub completion_rate: u8,
}

/// Completions in the Monday-based week containing `as_of`, against the weekly target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeeklyProgress {
    pub completed: u32,
    pub target: u8,
    pub met: bool,
}

/// ## Summary
/// Computes [`HabitStats`] over a trailing window of `window_days` days ending on
/// the reference day. The default window is fourteen days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyAnalyzer {
    window_days: u32,
}

impl Default for ConsistencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsistencyAnalyzer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window_days: TRAILING_WINDOW_DAYS,
        }
    }

    /// ## Summary
    /// Creates an analyzer with a custom trailing window.
    ///
    /// ## Errors
    /// Returns `EngineError::Validation` on `trailing_window_days` unless
    /// `window_days` is within `1..=366`.
    pub fn with_window(window_days: u32) -> EngineResult<Self> {
        if !(1..=MAX_TRAILING_WINDOW_DAYS).contains(&window_days) {
            return Err(EngineError::validation(
                "trailing_window_days",
                format!("{window_days} is outside 1..={MAX_TRAILING_WINDOW_DAYS}"),
            ));
        }
        Ok(Self { window_days })
    }

    #[must_use]
    pub const fn window_days(&self) -> u32 {
        self.window_days
    }

    /// ## Summary
    /// Computes the current streak and trailing completion rate of `habit` as of `as_of`.
    #[must_use]
    pub fn stats(&self, habit: &Habit, as_of: NaiveDate) -> HabitStats {
        if habit.log().is_empty() {
            return HabitStats::default();
        }

        let stats = HabitStats {
            streak: current_streak(habit.log(), as_of),
            completion_rate: self.completion_rate(habit.log(), as_of),
        };
        tracing::trace!(
            habit_id = %habit.id(),
            %as_of,
            streak = stats.streak,
            completion_rate = stats.completion_rate,
            "Computed habit stats"
        );
        stats
    }

    /// ## Summary
    /// Percentage of days in `[as_of - (window - 1), as_of]` present in `log`,
    /// rounded half up. The log is a set, so the count never exceeds the window.
    #[must_use]
    pub fn completion_rate(&self, log: &BTreeSet<NaiveDate>, as_of: NaiveDate) -> u8 {
        let lookback = Days::new(u64::from(self.window_days.saturating_sub(1)));
        let window_start = as_of.checked_sub_days(lookback).unwrap_or(NaiveDate::MIN);

        let completed = u64::try_from(log.range(window_start..=as_of).count()).unwrap_or(u64::MAX);
        let window = u64::from(self.window_days.max(1));
        let percent = completed.saturating_mul(100).saturating_add(window / 2) / window;

        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

/// ## Summary
/// Computes the streak and completion rate with the default fourteen-day window.
#[must_use]
pub fn stats(habit: &Habit, as_of: NaiveDate) -> HabitStats {
    ConsistencyAnalyzer::new().stats(habit, as_of)
}

/// ## Summary
/// Counts consecutive logged days ending on `as_of` or the day before.
///
/// Days after `as_of` are ignored rather than counted as a gap, so a log holding
/// only future days has no streak. If the most recent logged day on or before
/// `as_of` is older than yesterday the streak is broken and the result is zero.
#[must_use]
pub fn current_streak(log: &BTreeSet<NaiveDate>, as_of: NaiveDate) -> u32 {
    // Strictly descending: the set holds each day once.
    let mut days = log.range(..=as_of).rev();
    let Some(&latest) = days.next() else {
        return 0;
    };
    if days_between(as_of, latest) > 1 {
        return 0;
    }

    let mut streak: u32 = 1;
    let mut previous = latest;
    for &day in days {
        if days_between(previous, day) != 1 {
            break;
        }
        streak = streak.saturating_add(1);
        previous = day;
    }
    streak
}

/// Length of the longest run of consecutive logged days anywhere in `log`.
#[must_use]
pub fn longest_streak(log: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run: u32 = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in log {
        run = match previous {
            Some(prev) if days_between(day, prev) == 1 => run.saturating_add(1),
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// ## Summary
/// Counts completions from the Monday of `as_of`'s week through `as_of` and
/// compares them with the habit's weekly target.
#[must_use]
pub fn weekly_progress(habit: &Habit, as_of: NaiveDate) -> WeeklyProgress {
    let since_monday = Days::new(u64::from(as_of.weekday().num_days_from_monday()));
    let week_start = as_of.checked_sub_days(since_monday).unwrap_or(NaiveDate::MIN);

    let completed =
        u32::try_from(habit.log().range(week_start..=as_of).count()).unwrap_or(u32::MAX);
    let target = habit.target_per_week();

    WeeklyProgress {
        completed,
        target,
        met: completed >= u32::from(target),
    }
}
