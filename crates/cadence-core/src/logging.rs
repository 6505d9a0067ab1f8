//! Tracing bootstrap for applications embedding the engine.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Installs the global tracing subscriber with a filter built from `config.level`.
///
/// Returns `Ok(false)` if a global subscriber was already installed, which
/// leaves the existing one untouched.
///
/// ## Errors
/// Returns `CoreError::LoggingSetup` if the level is not a valid filter directive.
pub fn init_logging(config: &LoggingConfig) -> CoreResult<bool> {
    let filter = EnvFilter::try_new(config.level.as_str())
        .map_err(|e| CoreError::LoggingSetup(format!("invalid level {:?}: {e}", config.level)))?;

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = %config.level, "Logging initialized");
    }

    Ok(installed)
}
