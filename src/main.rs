//! `mesh`: query the AI-Agent Mesh APIs and check webhook signatures.

use mesh_sdk::config::{Cli, Command, ValidatedConfig};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, print_run_hint, setup_tracing};
use run::RunError;

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Init must work even when the existing config is broken
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    // Config loading emits debug events of its own
    setup_tracing(cli.verbose);

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    tracing::debug!("{config}");

    run_application(cli.command, &config)
}

fn handle_init(output: &std::path::Path) -> ExitCode {
    match run::init_config(output) {
        Ok(message) => {
            println!("{message}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Everything after config loading: run the command, print, pick the exit code.
#[cfg(not(tarpaulin_include))]
fn run_application(command: Command, config: &ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(command, config)) {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(RunError::SignatureMismatch) => {
            eprintln!("{}", RunError::SignatureMismatch);
            exit_code::signature_mismatch()
        }
        Err(RunError::Config(e)) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
        Err(e) => {
            tracing::error!("{e}");
            print_run_hint(&e);
            exit_code::runtime_error()
        }
    }
}
