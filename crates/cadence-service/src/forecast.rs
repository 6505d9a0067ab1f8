//! Forecasting occurrences of persisted recurring rules over a date window.

use cadence_calendar::calendar::{days_between, parse_date};
use cadence_calendar::recurrence::{Expander, RecurringRule, RecurringRuleRecord};
use cadence_core::config::{ExpansionConfig, Settings};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult, log_record_failure};

/// Occurrences of one rule inside the requested window, or why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleForecast {
    pub rule_id: Uuid,
    pub label: Option<String>,
    pub outcome: ServiceResult<Vec<NaiveDate>>,
}

/// One scheduled item in a date-ordered agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaEntry {
    pub date: NaiveDate,
    pub rule_id: Uuid,
    pub label: Option<String>,
}

/// ## Summary
/// Expands batches of persisted rules for calendar and forecasting views.
#[derive(Debug, Clone)]
pub struct ForecastService {
    expander: Expander,
    max_window_days: u32,
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new(&ExpansionConfig::default())
    }
}

impl ForecastService {
    #[must_use]
    pub const fn new(config: &ExpansionConfig) -> Self {
        Self {
            expander: Expander::new().with_iteration_margin(config.iteration_margin),
            max_window_days: config.max_window_days,
        }
    }

    /// ## Summary
    /// Builds the service from validated settings.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidConfiguration` if the settings fail validation.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        settings.validate()?;
        Ok(Self::new(&settings.expansion))
    }

    /// ## Summary
    /// Forecasts every record over `[range_start, range_end]` (inclusive).
    ///
    /// The window is checked once for the whole batch. After that each record
    /// gets its own outcome: a record that fails validation or trips the
    /// expansion guard is reported without affecting the others.
    ///
    /// ## Errors
    /// Returns `ServiceError::EngineError` with `InvalidRange` if `range_end` is
    /// before `range_start`, or `ServiceError::WindowTooWide` if the window is
    /// wider than the configured maximum.
    pub fn forecast(
        &self,
        records: &[RecurringRuleRecord],
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> ServiceResult<Vec<RuleForecast>> {
        self.check_window(range_start, range_end)?;

        let forecasts: Vec<RuleForecast> = records
            .iter()
            .map(|record| {
                let outcome = self.forecast_record(record, range_start, range_end);
                if let Err(err) = &outcome {
                    log_record_failure("recurring_rule", record.id, err);
                }
                RuleForecast {
                    rule_id: record.id,
                    label: record.label.clone(),
                    outcome,
                }
            })
            .collect();

        tracing::debug!(
            rules = records.len(),
            failed = forecasts.iter().filter(|f| f.outcome.is_err()).count(),
            %range_start,
            %range_end,
            "Forecast complete"
        );

        Ok(forecasts)
    }

    /// ## Summary
    /// Same as [`ForecastService::forecast`] with the window given as `YYYY-MM-DD` strings.
    ///
    /// ## Errors
    /// Returns a validation error naming `range_start` or `range_end` if either
    /// is unparsable, plus every error of [`ForecastService::forecast`].
    pub fn forecast_str(
        &self,
        records: &[RecurringRuleRecord],
        range_start: &str,
        range_end: &str,
    ) -> ServiceResult<Vec<RuleForecast>> {
        let start = parse_date("range_start", range_start)?;
        let end = parse_date("range_end", range_end)?;
        self.forecast(records, start, end)
    }

    fn forecast_record(
        &self,
        record: &RecurringRuleRecord,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> ServiceResult<Vec<NaiveDate>> {
        let rule = RecurringRule::try_from(record)?;
        let dates = self.expander.expand(&rule, range_start, range_end)?.dates()?;
        tracing::trace!(rule_id = %record.id, occurrences = dates.len(), "Expanded rule");
        Ok(dates)
    }

    fn check_window(&self, range_start: NaiveDate, range_end: NaiveDate) -> ServiceResult<()> {
        if range_end < range_start {
            return Err(cadence_calendar::EngineError::InvalidRange {
                start: range_start,
                end: range_end,
            }
            .into());
        }

        let days = days_between(range_end, range_start) + 1;
        if days > i64::from(self.max_window_days) {
            return Err(ServiceError::WindowTooWide {
                days,
                max_days: self.max_window_days,
            });
        }
        Ok(())
    }
}

/// ## Summary
/// Flattens successful forecasts into one agenda ordered by date, then rule id.
/// Failed forecasts contribute nothing.
#[must_use]
pub fn upcoming(forecasts: &[RuleForecast]) -> Vec<AgendaEntry> {
    let mut agenda: Vec<AgendaEntry> = forecasts
        .iter()
        .filter_map(|forecast| Some((forecast, forecast.outcome.as_ref().ok()?)))
        .flat_map(|(forecast, dates)| {
            dates.iter().map(move |&date| AgendaEntry {
                date,
                rule_id: forecast.rule_id,
                label: forecast.label.clone(),
            })
        })
        .collect();

    agenda.sort_by_key(|entry| (entry.date, entry.rule_id));
    agenda
}
