//! External system integrations for dbmon.
//!
//! - [`document`] - Inventory parsing and integration document output
//!
//! # Example
//!
//! ```rust
//! use dbmon::adapters::document::{parse_document, render, OutputFormat};
//! use dbmon::config::CompileDefaults;
//! use dbmon::core::compile;
//!
//! let document = parse_document(
//!     "mysql_databases:\n  - host: db1.local\n    user: newrelic\n    password: secret\n",
//! )
//! .unwrap();
//! let report = compile(&document, &CompileDefaults::default()).unwrap();
//! let yaml = render(&report.to_document(), OutputFormat::Yaml).unwrap();
//! assert!(yaml.contains("nri-mysql"));
//! ```

pub mod document;
