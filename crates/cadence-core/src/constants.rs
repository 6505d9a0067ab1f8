/// Config file stem (`cadence.toml`) and environment variable prefix.
pub const CONFIG_FILE_NAME: &str = "cadence";
pub const ENV_PREFIX: &str = "CADENCE";

/// Calendar dates cross every boundary in this form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Steps allowed beyond the span of an expansion window before the guard trips.
pub const EXPANSION_ITERATION_MARGIN: u32 = 8;
/// Widest forecast window accepted by the service layer (ten years plus leap days).
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 3660;

pub const TRAILING_WINDOW_DAYS: u32 = 14;
pub const MAX_TRAILING_WINDOW_DAYS: u32 = 366;
