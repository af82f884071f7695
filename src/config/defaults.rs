//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the initial attempt.
pub const MAX_RETRIES: u32 = 3;

/// Default backoff factor in seconds.
pub const BACKOFF_FACTOR: f64 = 1.0;

/// Default maximum wait between attempts, in seconds.
pub const MAX_BACKOFF_SECS: u64 = 120;

/// File name written by `mesh init` when no output path is given.
pub const CONFIG_FILE_NAME: &str = "mesh.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default maximum backoff as Duration.
#[must_use]
pub const fn max_backoff() -> Duration {
    Duration::from_secs(MAX_BACKOFF_SECS)
}

/// Per-user configuration file, `<config dir>/mesh/config.toml`.
///
/// Returns `None` on platforms without a configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mesh").join("config.toml"))
}
