// dbmon - Database Monitoring Configuration Compiler
// Copyright (c) 2025 dbmon Contributors
// Licensed under the MIT License

//! # dbmon - Database Monitoring Configuration Compiler
//!
//! dbmon compiles a declarative inventory of MySQL and PostgreSQL databases
//! into the integration blocks consumed by the infrastructure monitoring
//! agent.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** legacy (flat) and enhanced (nested, provider-aware) inventories
//! - **Resolving** every field through one precedence rule: nested field, legacy
//!   flat field, global default, built-in default
//! - **Referencing** passwords in plaintext, environment variables, AWS Secrets
//!   Manager or SSM Parameter Store without ever contacting those services
//! - **Isolating** failures per entry so one bad record never blocks the rest
//!
//! ## Architecture
//!
//! dbmon follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Detection, validation, resolvers and compilers
//! - [`adapters`] - Inventory parsing and output rendering
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Compiler configuration and global defaults
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbmon::adapters::document::{read_document, render, OutputFormat};
//! use dbmon::config::load_config_or_default;
//! use dbmon::core::compile;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("dbmon.toml")?;
//!     let document = read_document("inventory.yml")?;
//!
//!     let report = compile(&document, &config.defaults)?;
//!     for rejected in &report.rejected {
//!         eprintln!("{rejected}");
//!     }
//!
//!     print!("{}", render(&report.to_document(), OutputFormat::Yaml)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Failures that abort a run use [`domain::DbmonError`]; failures scoped to a
//! single entry are [`domain::EntryError`] values collected in the report:
//!
//! ```rust
//! use dbmon::config::CompileDefaults;
//! use dbmon::core::compile;
//! use serde_json::json;
//!
//! let document = json!({
//!     "mysql_databases": [
//!         {"provider": "rds", "connection": {"endpoint": "db.rds"},
//!          "credentials": {"username": "nr", "password_source": "aws_secrets_manager"}}
//!     ]
//! });
//!
//! let report = compile(&document, &CompileDefaults::default()).unwrap();
//! assert!(report.compiled.is_empty());
//! assert_eq!(report.rejected[0].error.kind(), "credential");
//! ```
//!
//! ## Logging
//!
//! dbmon uses structured logging with the `tracing` crate. Per-entry events
//! carry `entry`, `engine` and `provider` fields; passwords are held in
//! `secrecy` wrappers and never logged.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
