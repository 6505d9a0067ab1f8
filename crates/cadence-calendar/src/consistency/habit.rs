use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::parse_date;
use crate::error::{EngineError, EngineResult};

/// ## Summary
/// A habit and its completion log.
///
/// The log is a set of calendar days: recording the same day twice has no
/// effect, and the order entries were recorded in is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    id: Uuid,
    target_per_week: u8,
    log: BTreeSet<NaiveDate>,
}

impl Habit {
    /// ## Summary
    /// Creates a habit with an empty log.
    ///
    /// ## Errors
    /// Returns `EngineError::Validation` on `target_per_week` unless it is within 1..=7.
    pub fn new(id: Uuid, target_per_week: u8) -> EngineResult<Self> {
        if !(1..=7).contains(&target_per_week) {
            return Err(EngineError::validation(
                "target_per_week",
                format!("{target_per_week} is outside 1..=7"),
            ));
        }
        Ok(Self {
            id,
            target_per_week,
            log: BTreeSet::new(),
        })
    }

    #[must_use]
    pub fn with_completions(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.log.extend(days);
        self
    }

    /// Records a completed day. Returns `false` if the day was already logged.
    pub fn record_completion(&mut self, day: NaiveDate) -> bool {
        self.log.insert(day)
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn target_per_week(&self) -> u8 {
        self.target_per_week
    }

    #[must_use]
    pub const fn log(&self) -> &BTreeSet<NaiveDate> {
        &self.log
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLogRecord {
    pub completed_date: String,
}

/// A habit as stored by the persistence layer. Log entries may repeat and
/// arrive in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub target_per_week: i64,
    #[serde(default)]
    pub logs: Vec<HabitLogRecord>,
}

impl TryFrom<&HabitRecord> for Habit {
    type Error = EngineError;

    fn try_from(record: &HabitRecord) -> EngineResult<Self> {
        let target_per_week = u8::try_from(record.target_per_week)
            .ok()
            .filter(|target| (1..=7).contains(target))
            .ok_or_else(|| {
                EngineError::validation(
                    "target_per_week",
                    format!("{} is outside 1..=7", record.target_per_week),
                )
            })?;
        let mut habit = Self::new(record.id, target_per_week)?;

        for (index, entry) in record.logs.iter().enumerate() {
            let day = parse_date(&format!("logs[{index}].completed_date"), &entry.completed_date)?;
            if !habit.record_completion(day) {
                tracing::trace!(habit_id = %record.id, %day, "Duplicate log entry");
            }
        }

        Ok(habit)
    }
}

impl TryFrom<HabitRecord> for Habit {
    type Error = EngineError;

    fn try_from(record: HabitRecord) -> EngineResult<Self> {
        Self::try_from(&record)
    }
}
