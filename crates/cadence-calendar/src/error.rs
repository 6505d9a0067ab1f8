use chrono::NaiveDate;
use thiserror::Error;

/// Engine errors. All of them are scoped to the single rule or habit being processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The expansion cursor stopped advancing or ran past its iteration ceiling.
    #[error(
        "Expansion starting {start_date} stopped at {cursor} after {iterations} iterations without passing its bound"
    )]
    NonTerminationGuard {
        start_date: NaiveDate,
        cursor: NaiveDate,
        iterations: u32,
    },
}

impl EngineError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Malformed input, as opposed to a defect in the calendar arithmetic.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidRange { .. })
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
