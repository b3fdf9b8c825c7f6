//! Validate command implementation
//!
//! This module implements the `validate` command: it runs detection,
//! validation and resolution over an inventory and prints a report without
//! writing anything.

use super::{error_exit_code, report_exit_code};
use crate::adapters::document::read_document;
use crate::config::DbmonConfig;
use crate::core::compile;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Inventory file (YAML or JSON)
    pub input: String,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &DbmonConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Validating inventory");

        println!("🔍 Validating inventory: {}", self.input);
        println!();

        let document = match read_document(&self.input) {
            Ok(document) => {
                println!("✅ Inventory loaded successfully");
                document
            }
            Err(e) => {
                println!("❌ Failed to load inventory");
                println!("   Error: {e}");
                return Ok(error_exit_code(&e));
            }
        };

        let report = match compile(&document, &config.defaults) {
            Ok(report) => report,
            Err(e) => {
                println!("❌ Inventory is not valid");
                println!("   Error: {e}");
                return Ok(error_exit_code(&e));
            }
        };

        println!("   Schema mode: {}", report.mode);
        println!();

        for entry in &report.compiled {
            println!(
                "✅ {} ({}, {})",
                entry.service_name, entry.engine, entry.provider
            );
        }
        for rejected in &report.rejected {
            println!("❌ {}", rejected.entry);
            println!("   Error: {}", rejected.error);
        }
        for warning in &report.warnings {
            println!("⚠️  {warning}");
        }

        println!();
        println!("Summary:");
        println!("  Compiled: {}", report.compiled.len());
        println!("  Rejected: {}", report.rejected.len());
        println!("  Skipped: {}", report.skipped);
        println!("  Warnings: {}", report.warnings.len());
        println!();

        Ok(report_exit_code(&report))
    }
}
