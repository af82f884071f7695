//! Process-level glue for the `mesh` binary: exit codes, log output and
//! follow-up hints printed after a failure.

use mesh_sdk::ErrorKind;
use mesh_sdk::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

const INIT_HINT: &str = "\nRun 'mesh init' to generate a configuration template.";

pub mod exit_code {
    use std::process::ExitCode;

    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad arguments, unreadable config, missing credentials.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The API or the network failed the command.
    // `ExitCode::from` is not const
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// `webhook verify` rejected the signature.
    pub fn signature_mismatch() -> ExitCode {
        ExitCode::from(3)
    }
}

pub fn print_config_hint(error: &ConfigError) {
    let wants_init = match error {
        ConfigError::MissingRequired { field: name, .. } => {
            [field::API_KEY, field::PARTNER_ID].contains(name)
        }
        ConfigError::FileRead { .. } => true,
        _ => false,
    };

    if wants_init {
        eprintln!("{INIT_HINT}");
    }
}

/// Suggests a fix for the API failures a user can do something about.
pub fn print_run_hint(error: &RunError) {
    let RunError::Api(api) = error else {
        return;
    };

    let hint = match api.kind() {
        ErrorKind::Authentication => {
            "Check --api-key, MESH_API_KEY or api.api_key in the config file."
        }
        ErrorKind::RateLimit => {
            "The API is rate limiting requests; retry later or raise --max-retries."
        }
        _ => return,
    };
    eprintln!("\n{hint}");
}

/// Installs the global subscriber. `RUST_LOG` wins over `--verbose`.
///
/// Everything goes to stderr; stdout carries only command output.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
