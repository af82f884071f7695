//! The `mesh` command line.
//!
//! Connection options are global so they can follow any subcommand, and the
//! credential options also read `MESH_*` environment variables.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::platform::ListAgents;

use super::defaults;

/// mesh: command-line client for the AI-Agent Mesh platform
///
/// Inspects agents, account usage and partner tenants, and verifies
/// webhook deliveries.
#[derive(Debug, Parser)]
#[command(name = "mesh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API key used as the bearer token
    #[arg(long = "api-key", env = "MESH_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Partner id (required by partner commands)
    #[arg(long = "partner-id", env = "MESH_PARTNER_ID", global = true)]
    pub partner_id: Option<String>,

    /// Override the API base URL
    #[arg(long = "base-url", env = "MESH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries after the initial attempt for retryable failures
    #[arg(long = "max-retries", global = true)]
    pub max_retries: Option<u32>,

    /// TOML settings file [default: per-user mesh/config.toml if present]
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log requests and retries at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a commented settings template
    Init {
        /// Where to write the template
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },

    /// Inspect agents
    Agents {
        #[command(subcommand)]
        action: AgentsCommand,
    },

    /// Show account usage and limits
    Account {
        #[command(subcommand)]
        action: AccountCommand,
    },

    /// Inspect partner tenants
    Tenants {
        #[command(subcommand)]
        action: TenantsCommand,
    },

    /// Webhook delivery helpers
    Webhook {
        #[command(subcommand)]
        action: WebhookCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AgentsCommand {
    /// List agents
    List {
        /// Only agents with this status
        #[arg(long)]
        status: Option<String>,

        /// Only agents of this type
        #[arg(long = "type")]
        agent_type: Option<String>,

        /// Maximum number of agents returned
        #[arg(long, default_value_t = ListAgents::DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Show one agent
    Get {
        /// Agent id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Current usage
    Usage,
    /// Plan limits
    Limits,
}

#[derive(Debug, Subcommand)]
pub enum TenantsCommand {
    /// List tenants of the partner
    List {
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        plan: Option<String>,
    },

    /// Show one tenant
    Get {
        /// Tenant id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    /// Check the HMAC-SHA256 signature of a delivery
    Verify {
        /// File holding the raw request body, byte for byte
        #[arg(long)]
        payload: PathBuf,

        /// Hex signature from the delivery headers
        #[arg(long)]
        signature: String,

        /// Shared webhook secret
        #[arg(long, env = "MESH_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,
    },
}

impl Command {
    /// Everything except `init` and `webhook verify` calls the API.
    #[must_use]
    pub const fn needs_api(&self) -> bool {
        !matches!(self, Self::Init { .. } | Self::Webhook { .. })
    }

    /// Partner commands additionally need a partner id.
    #[must_use]
    pub const fn is_partner(&self) -> bool {
        matches!(self, Self::Tenants { .. })
    }
}

impl Cli {
    /// Reads `std::env::args`, exiting with usage on bad input.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses an explicit argument list; the first item is the program name.
    pub fn parse_from_iter<A>(args: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }
}
