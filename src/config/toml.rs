//! Shape of `mesh.toml`.
//!
//! Every key is optional. Unknown keys are rejected so that typos surface
//! as errors instead of silently falling back to defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// The whole file, as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub retry: RetrySection,
}

/// `[api]`: credentials and where to send requests.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub api_key: Option<String>,
    pub partner_id: Option<String>,
    pub base_url: Option<String>,
    /// Path segment placed between the base URL and every resource path
    pub api_version: Option<String>,
    /// Seconds
    pub timeout: Option<u64>,
}

/// `[retry]`: the transport's retry budget.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Not counting the first attempt
    pub max_retries: Option<u32>,
    /// Seconds; doubled on each further retry
    pub backoff_factor: Option<f64>,
    /// Seconds; upper bound for any single wait
    pub max_backoff: Option<u64>,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] if the file cannot be read, otherwise
    /// whatever [`TomlConfig::parse`] reports.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(source) => Err(ConfigError::FileRead {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] for bad syntax, wrong types or unknown keys.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

const TEMPLATE: &str = r#"# mesh configuration file
#
# Values given on the command line or through MESH_* environment
# variables take precedence over this file.

[api]
# API key (required for API commands, or set MESH_API_KEY)
# api_key = "sk_live_..."

# Partner id (required for tenant commands, or set MESH_PARTNER_ID)
# partner_id = "partner-42"

# Base URL override
# Platform default: https://api.ai-agent-mesh.com/v3
# Partner default:  https://partner-api.meshos.io (version segment "v1")
# base_url = "https://api.ai-agent-mesh.com/v3"

# Version path segment appended to the base URL (partner API only by default)
# api_version = "v1"

# Request timeout in seconds (default: 30)
timeout = 30

[retry]
# Retries after the initial attempt for 429/500/502/503/504 (default: 3)
# max_retries = 3

# Wait before retry n is backoff_factor * 2^(n-1) seconds (default: 1.0)
# backoff_factor = 1.0

# Maximum wait between attempts in seconds (default: 120)
# max_backoff = 120
"#;

/// The commented file `mesh init` writes. It parses to the defaults.
#[must_use]
pub fn default_config_template() -> String {
    TEMPLATE.to_owned()
}
