//! Habit dashboard: consistency metrics for a batch of persisted habits.

use cadence_calendar::calendar::parse_date;
use cadence_calendar::consistency::{
    ConsistencyAnalyzer, Habit, HabitRecord, HabitStats, WeeklyProgress, longest_streak,
    weekly_progress,
};
use cadence_core::config::{AnalyticsConfig, Settings};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceResult, log_record_failure};

/// Everything the habit tracker renders for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HabitSummary {
    pub habit_id: Uuid,
    #[serde(flatten)]
    pub stats: HabitStats,
    pub longest_streak: u32,
    pub week: WeeklyProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitReport {
    pub habit_id: Uuid,
    pub outcome: ServiceResult<HabitSummary>,
}

#[derive(Debug, Clone, Default)]
pub struct HabitService {
    analyzer: ConsistencyAnalyzer,
}

impl HabitService {
    /// ## Summary
    /// Creates the service with the configured trailing window.
    ///
    /// ## Errors
    /// Returns a validation error if the window is outside `1..=366` days.
    pub fn new(config: &AnalyticsConfig) -> ServiceResult<Self> {
        Ok(Self {
            analyzer: ConsistencyAnalyzer::with_window(config.trailing_window_days)?,
        })
    }

    /// ## Summary
    /// Builds the service from validated settings.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidConfiguration` if the settings fail validation.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        settings.validate()?;
        Self::new(&settings.analytics)
    }

    #[must_use]
    pub fn summarize(&self, habit: &Habit, as_of: NaiveDate) -> HabitSummary {
        HabitSummary {
            habit_id: habit.id(),
            stats: self.analyzer.stats(habit, as_of),
            longest_streak: longest_streak(habit.log()),
            week: weekly_progress(habit, as_of),
        }
    }

    /// ## Summary
    /// Summarizes every habit as of `as_of`, one report per record.
    ///
    /// A record with an unparsable log entry gets an error report naming the
    /// entry; the other habits are unaffected.
    #[must_use]
    pub fn dashboard(&self, records: &[HabitRecord], as_of: NaiveDate) -> Vec<HabitReport> {
        let reports: Vec<HabitReport> = records
            .iter()
            .map(|record| {
                let outcome = Habit::try_from(record)
                    .map(|habit| self.summarize(&habit, as_of))
                    .map_err(Into::into);
                if let Err(err) = &outcome {
                    log_record_failure("habit", record.id, err);
                }
                HabitReport {
                    habit_id: record.id,
                    outcome,
                }
            })
            .collect();

        tracing::debug!(
            habits = records.len(),
            failed = reports.iter().filter(|r| r.outcome.is_err()).count(),
            %as_of,
            "Habit dashboard computed"
        );
        reports
    }

    /// ## Summary
    /// Same as [`HabitService::dashboard`] with the reference day as a `YYYY-MM-DD` string.
    ///
    /// ## Errors
    /// Returns a validation error naming `as_of` if it is unparsable.
    pub fn dashboard_str(
        &self,
        records: &[HabitRecord],
        as_of: &str,
    ) -> ServiceResult<Vec<HabitReport>> {
        Ok(self.dashboard(records, parse_date("as_of", as_of)?))
    }
}
