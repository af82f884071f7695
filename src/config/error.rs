//! Failures while loading, merging or writing `mesh` settings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops the CLI before a command can run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `mesh init` could not create the template.
    #[error("Cannot write config file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A setting that has no default was given nowhere.
    #[error("{field} is not set. {hint}")]
    MissingRequired {
        /// One of the names in [`field`]
        field: &'static str,
        /// Tells the user where the value can come from
        hint: &'static str,
    },

    #[error("Base URL '{url}' is unusable: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{field} must be a positive duration: {reason}")]
    InvalidDuration { field: &'static str, reason: String },

    /// Backoff settings that cannot produce a sane delay.
    #[error("Retry settings rejected: {0}")]
    InvalidRetry(String),
}

/// Setting names reported by [`ConfigError::MissingRequired`].
pub mod field {
    pub const API_KEY: &str = "api_key";
    /// Only the `tenants` commands need this one.
    pub const PARTNER_ID: &str = "partner_id";
}

impl ConfigError {
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
