//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dbmon using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// dbmon - database monitoring configuration compiler
#[derive(Parser, Debug)]
#[command(name = "dbmon")]
#[command(version, about, long_about = None)]
#[command(author = "dbmon Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dbmon.toml", env = "DBMON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DBMON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an inventory into an integrations document
    Compile(commands::compile::CompileArgs),

    /// Check an inventory and report per-entry results
    Validate(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_compile() {
        let cli = Cli::parse_from(["dbmon", "compile", "inventory.yml"]);
        assert_eq!(cli.config, "dbmon.toml");
        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.input, "inventory.yml");
                assert_eq!(args.output, None);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_compile_options() {
        let cli = Cli::parse_from([
            "dbmon",
            "compile",
            "inventory.yml",
            "--output",
            "out.json",
            "--format",
            "json",
            "--environment",
            "staging",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.output.as_deref(), Some("out.json"));
                assert_eq!(args.format.as_deref(), Some("json"));
                assert_eq!(args.environment.as_deref(), Some("staging"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["dbmon", "--config", "custom.toml", "validate", "inv.yml"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["dbmon", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["dbmon", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "dbmon.toml");
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["dbmon", "compile"]).is_err());
    }
}
