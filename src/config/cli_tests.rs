//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{AccountCommand, AgentsCommand, Cli, Command, TenantsCommand, WebhookCommand};

mod parsing {
    use super::*;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["mesh", "init"]);

        let Command::Init { output } = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, PathBuf::from("mesh.toml"));
    }

    #[test]
    fn parse_init_with_output() {
        let cli = Cli::parse_from_iter(["mesh", "init", "-o", "/tmp/custom.toml"]);

        let Command::Init { output } = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn parse_agents_list_filters() {
        let cli = Cli::parse_from_iter([
            "mesh", "agents", "list", "--status", "active", "--type", "langchain", "--limit", "5",
        ]);

        let Command::Agents {
            action:
                AgentsCommand::List {
                    status,
                    agent_type,
                    limit,
                },
        } = cli.command
        else {
            panic!("expected agents list");
        };
        assert_eq!(status.as_deref(), Some("active"));
        assert_eq!(agent_type.as_deref(), Some("langchain"));
        assert_eq!(limit, 5);
    }

    #[test]
    fn agents_list_limit_defaults_to_100() {
        let cli = Cli::parse_from_iter(["mesh", "agents", "list"]);

        let Command::Agents {
            action: AgentsCommand::List { limit, status, .. },
        } = cli.command
        else {
            panic!("expected agents list");
        };
        assert_eq!(limit, 100);
        assert!(status.is_none());
    }

    #[test]
    fn parse_agents_get() {
        let cli = Cli::parse_from_iter(["mesh", "agents", "get", "agent-1"]);

        assert!(matches!(
            cli.command,
            Command::Agents {
                action: AgentsCommand::Get { ref id }
            } if id == "agent-1"
        ));
    }

    #[test]
    fn parse_account_commands() {
        let usage = Cli::parse_from_iter(["mesh", "account", "usage"]);
        let limits = Cli::parse_from_iter(["mesh", "account", "limits"]);

        assert!(matches!(
            usage.command,
            Command::Account {
                action: AccountCommand::Usage
            }
        ));
        assert!(matches!(
            limits.command,
            Command::Account {
                action: AccountCommand::Limits
            }
        ));
    }

    #[test]
    fn parse_tenants_list() {
        let cli = Cli::parse_from_iter(["mesh", "tenants", "list", "--region", "eu-west-1"]);

        let Command::Tenants {
            action: TenantsCommand::List { region, plan, .. },
        } = cli.command
        else {
            panic!("expected tenants list");
        };
        assert_eq!(region.as_deref(), Some("eu-west-1"));
        assert!(plan.is_none());
    }

    #[test]
    fn parse_webhook_verify() {
        let cli = Cli::parse_from_iter([
            "mesh",
            "webhook",
            "verify",
            "--payload",
            "body.json",
            "--signature",
            "abc123",
            "--secret",
            "whsec",
        ]);

        let Command::Webhook {
            action:
                WebhookCommand::Verify {
                    payload,
                    signature,
                    secret,
                },
        } = cli.command
        else {
            panic!("expected webhook verify");
        };
        assert_eq!(payload, PathBuf::from("body.json"));
        assert_eq!(signature, "abc123");
        assert_eq!(secret, "whsec");
    }
}

mod global_options {
    use super::*;

    #[test]
    fn options_before_subcommand() {
        let cli = Cli::parse_from_iter([
            "mesh",
            "--api-key",
            "sk_test",
            "--partner-id",
            "partner-42",
            "--base-url",
            "https://staging.example.com",
            "--timeout",
            "10",
            "--max-retries",
            "5",
            "-v",
            "account",
            "usage",
        ]);

        assert_eq!(cli.api_key.as_deref(), Some("sk_test"));
        assert_eq!(cli.partner_id.as_deref(), Some("partner-42"));
        assert_eq!(cli.base_url.as_deref(), Some("https://staging.example.com"));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.max_retries, Some(5));
        assert!(cli.verbose);
    }

    #[test]
    fn options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "mesh",
            "agents",
            "get",
            "agent-1",
            "--api-key",
            "sk_test",
            "-c",
            "/etc/mesh.toml",
        ]);

        assert_eq!(cli.api_key.as_deref(), Some("sk_test"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/mesh.toml")));
    }

    #[test]
    fn unset_options_are_none() {
        let cli = Cli::parse_from_iter(["mesh", "init"]);

        assert!(cli.timeout.is_none());
        assert!(cli.max_retries.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }
}

mod command_requirements {
    use super::*;

    #[test]
    fn init_and_webhook_need_no_api() {
        let init = Cli::parse_from_iter(["mesh", "init"]);
        let verify = Cli::parse_from_iter([
            "mesh", "webhook", "verify", "--payload", "p", "--signature", "s", "--secret", "k",
        ]);

        assert!(!init.command.needs_api());
        assert!(!verify.command.needs_api());
    }

    #[test]
    fn api_commands_need_api() {
        let agents = Cli::parse_from_iter(["mesh", "agents", "list"]);
        let tenants = Cli::parse_from_iter(["mesh", "tenants", "get", "t-1"]);

        assert!(agents.command.needs_api());
        assert!(!agents.command.is_partner());
        assert!(tenants.command.needs_api());
        assert!(tenants.command.is_partner());
    }
}

mod errors {
    use super::*;
    use clap::Parser;

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["mesh"]).is_err());
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let result = Cli::try_parse_from(["mesh", "--timeout", "soon", "account", "usage"]);

        assert!(result.is_err());
    }

    #[test]
    fn verify_requires_signature() {
        let result = Cli::try_parse_from(["mesh", "webhook", "verify", "--payload", "p"]);

        assert!(result.is_err());
    }
}
