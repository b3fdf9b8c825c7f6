// dbmon - Database Monitoring Configuration Compiler
// Copyright (c) 2025 dbmon Contributors
// Licensed under the MIT License

use clap::Parser;
use dbmon::cli::commands::{error_exit_code, EXIT_FATAL};
use dbmon::cli::{Cli, Commands};
use dbmon::config::{load_config_or_default, DbmonConfig, LoggingConfig};
use dbmon::domain::Result;
use dbmon::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // `init` never reads the configuration it is about to create
    let config = match &cli.command {
        Commands::Init(_) => Ok(DbmonConfig::default()),
        _ => load_config_or_default(&cli.config),
    };

    // CLI flag wins over the configured level
    let (log_level, logging_config) = match &config {
        Ok(c) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| c.application.log_level.clone()),
            c.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(error_exit_code(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "dbmon - Database Monitoring Configuration Compiler"
    );

    let exit_code = match execute_command(&cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: Result<DbmonConfig>) -> anyhow::Result<i32> {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, config = %cli.config, "Failed to load configuration");
            eprintln!("❌ {e}");
            return Ok(error_exit_code(&e));
        }
    };

    match &cli.command {
        Commands::Compile(args) => args.execute(&config),
        Commands::Validate(args) => args.execute(&config),
        Commands::Init(args) => args.execute(),
    }
}
