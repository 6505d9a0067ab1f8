//! Habit completion logs and the streak / completion-rate analytics over them.

mod habit;
mod stats;

pub use habit::{Habit, HabitLogRecord, HabitRecord};
pub use stats::{
    ConsistencyAnalyzer, HabitStats, WeeklyProgress, current_streak, longest_streak, stats,
    weekly_progress,
};
