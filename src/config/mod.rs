//! Configuration layer of the `mesh` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line
//! 2. **Environment** - `MESH_API_KEY`, `MESH_PARTNER_ID`, `MESH_BASE_URL`
//! 3. **TOML config file** - `--config`, else `<config dir>/mesh/config.toml` if present
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! # CLI-Only vs TOML-Only Options
//!
//! Some options are TOML-only (not available via CLI):
//! - `api.api_version` - Version path segment override
//! - `retry.backoff_factor` (default: 1.0) - Exponential backoff scale in seconds
//! - `retry.max_backoff` (default: 120s) - Maximum wait between attempts

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{AccountCommand, AgentsCommand, Cli, Command, TenantsCommand, WebhookCommand};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, RetrySection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
