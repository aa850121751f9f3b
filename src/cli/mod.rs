//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for hirelink using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// hirelink - ATS/HRIS platform sync
#[derive(Parser, Debug)]
#[command(name = "hirelink")]
#[command(version, about, long_about = None)]
#[command(author = "hirelink Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hirelink.toml", env = "HIRELINK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HIRELINK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync configured integrations into the record store
    Sync(commands::sync::SyncArgs),

    /// Import a JSON file of raw platform records
    Import(commands::import::ImportArgs),

    /// Export stored records to a JSON file
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityType;

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from(["hirelink", "sync"]);
        assert_eq!(cli.config, "hirelink.toml");
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parse_sync_flags() {
        let cli = Cli::parse_from([
            "hirelink",
            "--config",
            "custom.toml",
            "sync",
            "--integration",
            "gh",
            "--entity",
            "jobs,candidates",
            "--dry-run",
        ]);
        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.integration.as_deref(), Some("gh"));
                assert_eq!(args.entity.as_deref(), Some("jobs,candidates"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["hirelink", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from([
            "hirelink", "import", "--platform", "greenhouse", "--entity", "jobs", "--file",
            "jobs.json",
        ]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.platform, "greenhouse");
                assert_eq!(args.entity, EntityType::Jobs);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_entity() {
        let result = Cli::try_parse_from([
            "hirelink", "export", "--platform", "greenhouse", "--entity", "offers", "--output",
            "out.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["hirelink", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "hirelink.toml");
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
