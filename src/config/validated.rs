//! The merged settings a command actually runs with.
//!
//! Every check happens while building [`ValidatedConfig`]; once one exists,
//! the only remaining failure is asking for a client the command did not
//! need credentials for.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::dispatch::ClientConfig;
use crate::transport::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{TomlConfig, default_config_template};

const API_KEY_HINT: &str = "Use --api-key, set MESH_API_KEY, or set api.api_key in config file";
const PARTNER_ID_HINT: &str =
    "Use --partner-id, set MESH_PARTNER_ID, or set api.partner_id in config file";

/// Settings after merging command line, environment, file and defaults.
///
/// Credentials stay optional: `mesh init` and `mesh webhook verify` need
/// neither, and only `tenants` commands need a partner id.
pub struct ValidatedConfig {
    pub api_key: Option<String>,
    pub partner_id: Option<String>,
    /// `None` keeps whichever default the targeted API has
    pub base_url: Option<Url>,
    pub api_version: Option<String>,
    /// Applies to each attempt separately
    pub timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.api_key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ValidatedConfig")
            .field("api_key", &key)
            .field("partner_id", &self.partner_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// One-line summary for debug logs. Never prints the key itself.
impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let retry = &self.retry_policy;
        let base = self.base_url.as_ref().map_or("default", Url::as_str);
        let partner = self.partner_id.as_deref().unwrap_or("none");
        let key = if self.api_key.is_some() {
            "set"
        } else {
            "unset"
        };

        write!(
            f,
            "Config {{ base_url: {base}, partner_id: {partner}, timeout: {}s, retry: {}x/{}s (max {}s), api_key: {key} }}",
            self.timeout.as_secs(),
            retry.total,
            retry.backoff_factor,
            retry.max_backoff.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Merges the parsed command line with an optional parsed file.
    ///
    /// For each setting the first source that has a non-blank value wins:
    /// flag or `MESH_*` variable, then the file, then the built-in default.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequired`] when the command calls the API
    ///   without a key, or a `tenants` command has no partner id
    /// - [`ConfigError::InvalidUrl`] for an unparsable or non-HTTP base URL
    /// - [`ConfigError::InvalidDuration`] for a zero timeout
    /// - [`ConfigError::InvalidRetry`] for unusable backoff settings
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let file = toml.map(|t| &t.api);
        let api_key = first_set(
            cli.api_key.as_deref(),
            file.and_then(|a| a.api_key.as_deref()),
        );
        let partner_id = first_set(
            cli.partner_id.as_deref(),
            file.and_then(|a| a.partner_id.as_deref()),
        );

        if api_key.is_none() && cli.command.needs_api() {
            return Err(ConfigError::missing(field::API_KEY, API_KEY_HINT));
        }
        if partner_id.is_none() && cli.command.is_partner() {
            return Err(ConfigError::missing(field::PARTNER_ID, PARTNER_ID_HINT));
        }

        let api_version = first_set(None, file.and_then(|a| a.api_version.as_deref()))
            .map(|v| v.trim_matches('/').to_owned());

        Ok(Self {
            api_key,
            partner_id,
            base_url: base_url(cli, toml)?,
            api_version,
            timeout: timeout(cli, toml)?,
            retry_policy: retry_policy(cli, toml)?,
            verbose: cli.verbose,
        })
    }

    /// Reads the config file, if any, and merges it with `cli`.
    ///
    /// An explicit `--config` path must exist. Otherwise the per-user file
    /// at [`defaults::config_path`] is read only when it is there.
    ///
    /// # Errors
    ///
    /// File errors from [`TomlConfig::load`], then anything
    /// [`from_raw`](Self::from_raw) rejects.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, defaults::config_path().as_deref())
    }

    /// [`load`](Self::load) with the per-user path supplied by the caller.
    ///
    /// # Errors
    ///
    /// As for [`load`](Self::load).
    pub fn load_with_fallback(cli: &Cli, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match cli.config.as_deref() {
            Some(explicit) => Some(explicit),
            None => fallback.filter(|p| p.is_file()),
        };

        let toml = path
            .map(|p| {
                tracing::debug!("Reading config file {}", p.display());
                TomlConfig::load(p)
            })
            .transpose()?;

        Self::from_raw(cli, toml.as_ref())
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingRequired`] if no API key was configured.
    pub fn platform_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = ClientConfig::platform(self.api_key()?);
        Ok(self.with_overrides(config))
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingRequired`] if the API key or the partner id
    /// was not configured.
    pub fn partner_config(&self) -> Result<ClientConfig, ConfigError> {
        let Some(partner_id) = self.partner_id.as_deref() else {
            return Err(ConfigError::missing(field::PARTNER_ID, PARTNER_ID_HINT));
        };
        let config = ClientConfig::partner(self.api_key()?, partner_id);
        Ok(self.with_overrides(config))
    }

    fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::missing(field::API_KEY, API_KEY_HINT))
    }

    fn with_overrides(&self, config: ClientConfig) -> ClientConfig {
        let config = match &self.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        };
        let config = match &self.api_version {
            Some(version) => config.with_api_version(Some(version.clone())),
            None => config,
        };

        config
            .with_timeout(self.timeout)
            .with_retry_policy(self.retry_policy.clone())
    }
}

fn base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
    let from_file = toml.and_then(|t| t.api.base_url.as_deref());
    let Some(raw) = first_set(cli.base_url.as_deref(), from_file) else {
        return Ok(None);
    };

    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.clone(),
        reason,
    };
    let url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        _ => Err(invalid("scheme must be http or https".to_owned())),
    }
}

fn timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
    let seconds = cli
        .timeout
        .or(toml.and_then(|t| t.api.timeout))
        .unwrap_or(defaults::TIMEOUT_SECS);

    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field: "timeout",
            reason: "zero would fail every request".to_owned(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

fn retry_policy(cli: &Cli, toml: Option<&TomlConfig>) -> Result<RetryPolicy, ConfigError> {
    let section = toml.map(|t| &t.retry);
    let total = cli
        .max_retries
        .or(section.and_then(|r| r.max_retries))
        .unwrap_or(defaults::MAX_RETRIES);
    let factor = section
        .and_then(|r| r.backoff_factor)
        .unwrap_or(defaults::BACKOFF_FACTOR);
    let cap = section
        .and_then(|r| r.max_backoff)
        .unwrap_or(defaults::MAX_BACKOFF_SECS);

    // RetryPolicy::with_backoff_factor panics on these
    if !factor.is_finite() || factor < 0.0 {
        return Err(ConfigError::InvalidRetry(
            "backoff_factor must be a non-negative finite number".to_owned(),
        ));
    }
    if cap == 0 && factor > 0.0 {
        return Err(ConfigError::InvalidRetry(
            "max_backoff must be greater than 0 when backoff_factor is set".to_owned(),
        ));
    }

    Ok(RetryPolicy::new()
        .with_total(total)
        .with_backoff_factor(factor)
        .with_max_backoff(Duration::from_secs(cap)))
}

/// Writes the `mesh init` template to `path`, creating parent directories.
///
/// # Errors
///
/// [`ConfigError::FileWrite`] if a directory or the file cannot be created.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::FileWrite {
        path: path.to_owned(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_error)?;
    }
    fs::write(path, default_config_template()).map_err(write_error)
}

/// The first of `primary`, `secondary` that is non-blank, trimmed.
fn first_set(primary: Option<&str>, secondary: Option<&str>) -> Option<String> {
    [primary, secondary]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_owned)
}
