//! Bounded, lazy expansion of a rule into the occurrences inside a window.

use std::iter::FusedIterator;

use cadence_core::constants::EXPANSION_ITERATION_MARGIN;
use chrono::NaiveDate;

use super::{RecurringRule, next_occurrence};
use crate::calendar::days_between;
use crate::error::{EngineError, EngineResult};

/// ## Summary
/// Expansion settings.
///
/// The iteration ceiling of every expansion is the number of days from the
/// rule's start to its effective upper bound, plus one step to pass that bound,
/// plus `iteration_margin`. Every well-formed step advances the cursor by at
/// least a day, so a rule that reaches the ceiling has stopped advancing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expander {
    iteration_margin: u32,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            iteration_margin: EXPANSION_ITERATION_MARGIN,
        }
    }

    /// Sets the number of steps tolerated beyond the span of the window.
    #[must_use]
    pub const fn with_iteration_margin(mut self, margin: u32) -> Self {
        self.iteration_margin = margin;
        self
    }

    #[must_use]
    pub const fn iteration_margin(&self) -> u32 {
        self.iteration_margin
    }

    /// ## Summary
    /// Plans the expansion of `rule` over `[range_start, range_end]` (inclusive).
    ///
    /// Nothing is computed until the returned [`Expansion`] is iterated.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidRange` if `range_end` is before `range_start`.
    pub fn expand(
        &self,
        rule: &RecurringRule,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> EngineResult<Expansion> {
        if range_end < range_start {
            return Err(EngineError::InvalidRange {
                start: range_start,
                end: range_end,
            });
        }

        let upper = rule
            .end_date()
            .map_or(range_end, |end_date| end_date.min(range_end));
        let span = u32::try_from(days_between(upper, rule.start_date()).max(0)).unwrap_or(u32::MAX);
        let max_iterations = span
            .saturating_add(1)
            .saturating_add(self.iteration_margin);

        tracing::trace!(
            frequency = %rule.frequency(),
            start_date = %rule.start_date(),
            %range_start,
            %upper,
            max_iterations,
            "Planned expansion"
        );

        Ok(Expansion {
            rule: *rule,
            range_start,
            upper,
            max_iterations,
        })
    }
}

/// ## Summary
/// Expands `rule` over `[range_start, range_end]` with the default iteration margin.
///
/// ## Errors
/// Returns `EngineError::InvalidRange` if `range_end` is before `range_start`.
pub fn expand(
    rule: &RecurringRule,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> EngineResult<Expansion> {
    Expander::new().expand(rule, range_start, range_end)
}

/// A planned, restartable expansion. Each call to [`Expansion::iter`] walks the
/// rule again from its start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    rule: RecurringRule,
    range_start: NaiveDate,
    /// The earlier of `range_end` and the rule's `end_date`.
    upper: NaiveDate,
    max_iterations: u32,
}

impl Expansion {
    #[must_use]
    pub fn iter(&self) -> Occurrences<'_> {
        Occurrences {
            expansion: self,
            cursor: Some(self.rule.start_date()),
            iterations: 0,
        }
    }

    /// ## Summary
    /// Collects every occurrence in the window.
    ///
    /// ## Errors
    /// Returns `EngineError::NonTerminationGuard` if the cursor stopped advancing.
    pub fn dates(&self) -> EngineResult<Vec<NaiveDate>> {
        self.iter().collect()
    }

    #[must_use]
    pub const fn rule(&self) -> &RecurringRule {
        &self.rule
    }

    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl<'a> IntoIterator for &'a Expansion {
    type Item = EngineResult<NaiveDate>;
    type IntoIter = Occurrences<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the occurrences of an [`Expansion`], in increasing order.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    expansion: &'a Expansion,
    cursor: Option<NaiveDate>,
    iterations: u32,
}

impl Occurrences<'_> {
    fn guard_tripped(&self, cursor: NaiveDate) -> EngineError {
        tracing::debug!(
            start_date = %self.expansion.rule.start_date(),
            %cursor,
            iterations = self.iterations,
            "Expansion guard tripped"
        );
        EngineError::NonTerminationGuard {
            start_date: self.expansion.rule.start_date(),
            cursor,
            iterations: self.iterations,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = EngineResult<NaiveDate>;

    fn next(&mut self) -> Option<Self::Item> {
        // `take` leaves the iterator exhausted on every early return.
        while let Some(current) = self.cursor.take() {
            if current > self.expansion.upper {
                return None;
            }
            if self.iterations >= self.expansion.max_iterations {
                return Some(Err(self.guard_tripped(current)));
            }

            self.iterations += 1;
            match next_occurrence(current, &self.expansion.rule) {
                Some(next) if next <= current => return Some(Err(self.guard_tripped(current))),
                next => self.cursor = next,
            }

            if current >= self.expansion.range_start {
                tracing::trace!(occurrence = %current, "Emitting occurrence");
                return Some(Ok(current));
            }
        }
        None
    }
}

impl FusedIterator for Occurrences<'_> {}
