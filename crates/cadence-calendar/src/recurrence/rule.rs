//! Validated recurring rules and their persisted record form.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Frequency;
use crate::calendar::{parse_date, weekday_from_sunday_index};
use crate::error::{EngineError, EngineResult};

/// The weekday or day-of-month a recurrence is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Weekday(Weekday),
    /// Day-of-month, 1..=31.
    MonthDay(u32),
}

/// ## Summary
/// A validated, immutable recurring schedule.
///
/// `start_date` is always the first occurrence. `end_date`, when present, is
/// an inclusive bound after which nothing is generated. The anchor is only
/// kept for frequencies that read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurringRule {
    frequency: Frequency,
    anchor: Option<Anchor>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl RecurringRule {
    #[must_use]
    pub const fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            frequency,
            anchor: None,
            start_date,
            end_date: None,
        }
    }

    /// ## Summary
    /// Applies an `occurrence_day`: a weekday index (0 = Sunday) for weekly and
    /// bi-weekly rules, a day-of-month (1..=31) for monthly rules. Daily and
    /// yearly rules ignore it.
    ///
    /// ## Errors
    /// Returns `EngineError::Validation` on `occurrence_day` if the value is out
    /// of range for the rule's frequency.
    pub fn with_occurrence_day(mut self, occurrence_day: i64) -> EngineResult<Self> {
        let frequency = self.frequency;
        let out_of_range = |range: &str| {
            EngineError::validation(
                "occurrence_day",
                format!("{occurrence_day} is outside {range} for a {frequency} rule"),
            )
        };

        self.anchor = if frequency.takes_weekday_anchor() {
            let weekday = u32::try_from(occurrence_day)
                .ok()
                .and_then(weekday_from_sunday_index)
                .ok_or_else(|| out_of_range("0..=6"))?;
            Some(Anchor::Weekday(weekday))
        } else if frequency.takes_month_day_anchor() {
            let day = u32::try_from(occurrence_day)
                .ok()
                .filter(|day| (1..=31).contains(day))
                .ok_or_else(|| out_of_range("1..=31"))?;
            Some(Anchor::MonthDay(day))
        } else {
            tracing::trace!(
                %frequency,
                occurrence_day,
                "Ignoring occurrence_day for unanchored frequency"
            );
            None
        };

        Ok(self)
    }

    /// ## Summary
    /// Sets the inclusive end bound.
    ///
    /// ## Errors
    /// Returns `EngineError::Validation` on `end_date` if it precedes `start_date`.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < self.start_date {
            return Err(EngineError::validation(
                "end_date",
                format!("{end_date} is before start_date {}", self.start_date),
            ));
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    #[must_use]
    pub const fn weekday_anchor(&self) -> Option<Weekday> {
        match self.anchor {
            Some(Anchor::Weekday(weekday)) => Some(weekday),
            _ => None,
        }
    }

    #[must_use]
    pub const fn month_day_anchor(&self) -> Option<u32> {
        match self.anchor {
            Some(Anchor::MonthDay(day)) => Some(day),
            _ => None,
        }
    }

    /// The anchor in its persisted integer form.
    #[must_use]
    pub fn occurrence_day(&self) -> Option<u32> {
        self.anchor.map(|anchor| match anchor {
            Anchor::Weekday(weekday) => weekday.num_days_from_sunday(),
            Anchor::MonthDay(day) => day,
        })
    }

    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// A recurring rule as stored by the persistence layer, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRuleRecord {
    pub id: Uuid,
    #[serde(default)]
    pub label: Option<String>,
    pub frequency: String,
    #[serde(default)]
    pub occurrence_day: Option<i64>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TryFrom<&RecurringRuleRecord> for RecurringRule {
    type Error = EngineError;

    fn try_from(record: &RecurringRuleRecord) -> EngineResult<Self> {
        let frequency = Frequency::parse(&record.frequency).ok_or_else(|| {
            EngineError::validation(
                "frequency",
                format!("unknown frequency {:?}", record.frequency),
            )
        })?;
        let start_date = parse_date("start_date", &record.start_date)?;

        let mut rule = Self::new(frequency, start_date);
        if let Some(occurrence_day) = record.occurrence_day {
            rule = rule.with_occurrence_day(occurrence_day)?;
        }
        if let Some(raw) = record.end_date.as_deref().filter(|raw| !raw.trim().is_empty()) {
            rule = rule.with_end_date(parse_date("end_date", raw)?)?;
        }

        Ok(rule)
    }
}

impl TryFrom<RecurringRuleRecord> for RecurringRule {
    type Error = EngineError;

    fn try_from(record: RecurringRuleRecord) -> EngineResult<Self> {
        Self::try_from(&record)
    }
}
