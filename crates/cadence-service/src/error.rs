use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    EngineError(#[from] cadence_calendar::EngineError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Forecast window of {days} days exceeds the maximum of {max_days}")]
    WindowTooWide { days: i64, max_days: u32 },
}

impl ServiceError {
    /// Whether the error stems from bad input rather than an engine defect.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::EngineError(err) => err.is_validation(),
            Self::WindowTooWide { .. } => true,
            Self::InvalidConfiguration(_) => false,
        }
    }
}

impl From<cadence_core::error::CoreError> for ServiceError {
    fn from(err: cadence_core::error::CoreError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Logs a per-record failure at the level its kind calls for.
pub(crate) fn log_record_failure(kind: &'static str, id: uuid::Uuid, err: &ServiceError) {
    if err.is_validation() {
        tracing::warn!(kind, %id, error = %err, "Record could not be processed");
    } else {
        tracing::error!(
            kind,
            %id,
            error = %err,
            "Calendar arithmetic did not advance; possible defect"
        );
    }
}
