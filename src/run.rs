//! Command execution.
//!
//! Each command builds the client it needs from the validated
//! configuration, performs one API call, and renders the result as
//! pretty-printed JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use mesh_sdk::config::{
    AccountCommand, AgentsCommand, Command, ConfigError, TenantsCommand, ValidatedConfig,
    WebhookCommand, write_default_config,
};
use mesh_sdk::partner::ListTenants;
use mesh_sdk::platform::ListAgents;
use mesh_sdk::{MeshClient, PartnerClient, verify_signature};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Invalid or incomplete configuration for the command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("API request failed: {0}")]
    Api(#[from] mesh_sdk::Error),

    /// The webhook payload file could not be read.
    #[error("Failed to read payload '{}': {source}", path.display())]
    PayloadRead {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The webhook signature does not match the payload.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The result could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

/// Executes a command and returns the text to print.
///
/// # Errors
///
/// Returns an error if the configuration lacks what the command needs,
/// the API call fails, or a webhook signature does not verify.
pub async fn execute(command: Command, config: &ValidatedConfig) -> Result<String, RunError> {
    match command {
        Command::Init { output } => init_config(&output),
        Command::Agents { action } => agents(action, config).await,
        Command::Account { action } => account(action, config).await,
        Command::Tenants { action } => tenants(action, config).await,
        Command::Webhook { action } => webhook(action),
    }
}

/// Writes the configuration template and returns the confirmation line.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn init_config(output: &Path) -> Result<String, RunError> {
    write_default_config(output)?;
    Ok(format!(
        "Configuration template written to: {}",
        output.display()
    ))
}

async fn agents(action: AgentsCommand, config: &ValidatedConfig) -> Result<String, RunError> {
    let client = MeshClient::from_config(config.platform_config()?)?;

    match action {
        AgentsCommand::List {
            status,
            agent_type,
            limit,
        } => {
            let filters = ListAgents {
                status,
                agent_type,
                limit,
            };
            let agents = client.agents().list(&filters).await?;
            tracing::debug!("Listed {} agent(s)", agents.len());
            render(&agents)
        }
        AgentsCommand::Get { id } => render(&client.agents().get(&id).await?),
    }
}

async fn account(action: AccountCommand, config: &ValidatedConfig) -> Result<String, RunError> {
    let client = MeshClient::from_config(config.platform_config()?)?;

    match action {
        AccountCommand::Usage => render(&client.account().usage().await?),
        AccountCommand::Limits => render(&client.account().limits().await?),
    }
}

async fn tenants(action: TenantsCommand, config: &ValidatedConfig) -> Result<String, RunError> {
    let client = PartnerClient::from_config(config.partner_config()?)?;

    match action {
        TenantsCommand::List {
            status,
            region,
            plan,
        } => {
            let filters = ListTenants {
                region,
                plan,
                status,
            };
            let tenants = client.tenants().list(&filters).await?;
            tracing::debug!("Listed {} tenant(s)", tenants.len());
            render(&tenants)
        }
        TenantsCommand::Get { id } => render(&client.tenants().get(&id).await?),
    }
}

fn webhook(action: WebhookCommand) -> Result<String, RunError> {
    match action {
        WebhookCommand::Verify {
            payload,
            signature,
            secret,
        } => {
            // Raw bytes: any re-encoding would change what was signed
            let body = std::fs::read(&payload).map_err(|e| RunError::PayloadRead {
                path: payload.clone(),
                source: e,
            })?;

            if verify_signature(&body, signature.trim(), &secret) {
                Ok("Signature valid".to_string())
            } else {
                Err(RunError::SignatureMismatch)
            }
        }
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, RunError> {
    serde_json::to_string_pretty(value).map_err(RunError::Render)
}
