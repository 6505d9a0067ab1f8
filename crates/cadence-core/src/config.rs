use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_MAX_WINDOW_DAYS, ENV_PREFIX, EXPANSION_ITERATION_MARGIN,
    MAX_TRAILING_WINDOW_DAYS, TRAILING_WINDOW_DAYS,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub expansion: ExpansionConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Extra cursor steps allowed beyond the span of the window.
    pub iteration_margin: u32,
    /// Widest `[range_start, range_end]` window a forecast may request.
    pub max_window_days: u32,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            iteration_margin: EXPANSION_ITERATION_MARGIN,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    pub trailing_window_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trailing_window_days: TRAILING_WINDOW_DAYS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            expansion: ExpansionConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `CADENCE_*` environment variables and
    /// an optional `cadence.toml`, then validates it.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Parses settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default(
                "expansion.iteration_margin",
                i64::from(EXPANSION_ITERATION_MARGIN),
            )?
            .set_default(
                "expansion.max_window_days",
                i64::from(DEFAULT_MAX_WINDOW_DAYS),
            )?
            .set_default(
                "analytics.trailing_window_days",
                i64::from(TRAILING_WINDOW_DAYS),
            )?)
    }

    /// ## Summary
    /// Checks value ranges that serde cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` naming the offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.expansion.max_window_days == 0 {
            return Err(CoreError::InvalidConfiguration(
                "expansion.max_window_days must be at least 1".to_string(),
            ));
        }

        let window = self.analytics.trailing_window_days;
        if !(1..=MAX_TRAILING_WINDOW_DAYS).contains(&window) {
            return Err(CoreError::InvalidConfiguration(format!(
                "analytics.trailing_window_days must be within 1..={MAX_TRAILING_WINDOW_DAYS}, got {window}"
            )));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
