//! Compile command implementation
//!
//! This module implements the `compile` command, which turns an inventory
//! into an agent integrations document.

use super::{error_exit_code, report_exit_code};
use crate::adapters::document::{read_document, render, write_atomic, OutputFormat};
use crate::config::DbmonConfig;
use crate::core::compile;
use crate::domain::DbmonError;
use clap::Args;

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Inventory file (YAML or JSON)
    pub input: String,

    /// Write the integrations document here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (yaml or json); defaults to application.output_format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Override the default `env` label
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Compile and print, but do not write the output file
    #[arg(long)]
    pub dry_run: bool,
}

impl CompileArgs {
    /// Execute the compile command
    ///
    /// Status lines go to stderr; stdout carries only the rendered document.
    pub fn execute(&self, config: &DbmonConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting compile command");

        let format: OutputFormat = match self
            .format
            .as_deref()
            .unwrap_or(config.application.output_format.as_str())
            .parse()
        {
            Ok(format) => format,
            Err(message) => {
                let e = DbmonError::Validation(message);
                eprintln!("❌ {e}");
                return Ok(error_exit_code(&e));
            }
        };

        let mut defaults = config.defaults.clone();
        if let Some(environment) = &self.environment {
            tracing::info!(environment = %environment, "Overriding environment from CLI");
            defaults.environment = environment.clone();
        }

        let document = match read_document(&self.input) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(error_exit_code(&e));
            }
        };

        let report = match compile(&document, &defaults) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(error_exit_code(&e));
            }
        };

        for rejected in &report.rejected {
            eprintln!("❌ {rejected}");
        }
        for warning in &report.warnings {
            eprintln!("⚠️  {warning}");
        }

        let rendered = match render(&report.to_document(), format) {
            Ok(rendered) => rendered,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(error_exit_code(&e));
            }
        };

        match (&self.output, self.dry_run) {
            (Some(path), false) => {
                if let Err(e) = write_atomic(path, &rendered) {
                    eprintln!("❌ {e}");
                    return Ok(error_exit_code(&e));
                }
                eprintln!(
                    "✅ Wrote {} integration(s) to {path}",
                    report.compiled.len()
                );
            }
            (output, dry_run) => {
                if dry_run {
                    tracing::info!(output = ?output, "Dry run: output file not written");
                }
                print!("{rendered}");
            }
        }

        eprintln!(
            "Compiled: {}, rejected: {}, skipped: {}",
            report.compiled.len(),
            report.rejected.len(),
            report.skipped
        );
        Ok(report_exit_code(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{EXIT_ALL_REJECTED, EXIT_CONFIG, EXIT_FATAL, EXIT_PARTIAL, EXIT_SUCCESS};
    use std::fs;
    use tempfile::TempDir;

    fn args(input: &str, output: Option<String>) -> CompileArgs {
        CompileArgs {
            input: input.to_string(),
            output,
            format: None,
            environment: None,
            dry_run: false,
        }
    }

    fn inventory(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("inventory.yml");
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_compile_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = inventory(
            &dir,
            "mysql_databases:\n  - host: db1\n    user: nr\n    password: pw\n",
        );
        let output = dir.path().join("out.yml");

        let code = args(&input, Some(output.to_string_lossy().into_owned()))
            .execute(&DbmonConfig::default())
            .unwrap();

        assert_eq!(code, EXIT_SUCCESS);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("nri-mysql"));
        assert!(written.contains("HOSTNAME: db1"));
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let input = inventory(
            &dir,
            "mysql_databases:\n  - host: db1\n    user: nr\n    password: pw\n",
        );
        let output = dir.path().join("out.yml");

        let mut compile = args(&input, Some(output.to_string_lossy().into_owned()));
        compile.dry_run = true;
        let code = compile.execute(&DbmonConfig::default()).unwrap();

        assert_eq!(code, EXIT_SUCCESS);
        assert!(!output.exists());
    }

    #[test]
    fn test_partial_and_all_rejected() {
        let dir = TempDir::new().unwrap();
        let input = inventory(
            &dir,
            "mysql_databases:\n  - host: db1\n    user: nr\n    password: pw\n  - user: nr\n    password: pw\n",
        );
        let code = args(&input, None).execute(&DbmonConfig::default()).unwrap();
        assert_eq!(code, EXIT_PARTIAL);

        let input = inventory(&dir, "mysql_databases:\n  - user: nr\n    password: pw\n");
        let code = args(&input, None).execute(&DbmonConfig::default()).unwrap();
        assert_eq!(code, EXIT_ALL_REJECTED);
    }

    #[test]
    fn test_unreadable_entry_is_rejected_alone() {
        let dir = TempDir::new().unwrap();
        let input = inventory(
            &dir,
            "mysql_databases:\n  - host: db1\n    user: nr\n    password: pw\n  - host: db2\n    user: nr\n    password: pw\n    labels: {~: x}\n",
        );
        let code = args(&input, None).execute(&DbmonConfig::default()).unwrap();
        assert_eq!(code, EXIT_PARTIAL);
    }

    #[test]
    fn test_document_error() {
        let dir = TempDir::new().unwrap();
        let input = inventory(&dir, "mysql_databases: {host: db1}\n");
        let code = args(&input, None).execute(&DbmonConfig::default()).unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let code = args("/nonexistent/inventory.yml", None)
            .execute(&DbmonConfig::default())
            .unwrap();
        assert_eq!(code, EXIT_FATAL);
    }

    #[test]
    fn test_invalid_format() {
        let mut compile = args("inventory.yml", None);
        compile.format = Some("xml".to_string());
        let code = compile.execute(&DbmonConfig::default()).unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
