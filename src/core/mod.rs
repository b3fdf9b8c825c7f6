//! Core compilation logic for dbmon.
//!
//! This module turns a raw inventory document into agent integration blocks.
//!
//! # Modules
//!
//! - [`detect`] - Schema mode detection (legacy vs enhanced)
//! - [`field`] - Cascading field lookup shared by every resolver
//! - [`validation`] - Structural entry checks and advisory warnings
//! - [`provider`] - Host, port and provider capabilities
//! - [`credentials`] - Username and password reference
//! - [`tls`] - TLS mode and CA bundle
//! - [`monitoring`] - Collection tuning and provider flags
//! - [`labels`] - Label composition
//! - [`compile`] - Entry and document compilers, compile report
//!
//! # Compile Workflow
//!
//! 1. **Detect**: Classify the document as legacy or enhanced
//! 2. **Validate**: Reject structurally malformed entries
//! 3. **Resolve**: Provider, credentials, TLS, monitoring, labels
//! 4. **Report**: Collect compiled blocks, rejections and warnings
//!
//! # Example
//!
//! ```rust
//! use dbmon::config::CompileDefaults;
//! use dbmon::core::compile::compile;
//! use serde_json::json;
//!
//! let document = json!({
//!     "mysql_databases": [
//!         {"host": "db1.local", "user": "newrelic", "password": "secret"}
//!     ]
//! });
//!
//! let report = compile(&document, &CompileDefaults::default()).unwrap();
//! assert_eq!(report.compiled.len(), 1);
//! assert!(report.is_complete());
//! ```

pub mod compile;
pub mod credentials;
pub mod detect;
pub mod field;
pub mod labels;
pub mod monitoring;
pub mod provider;
pub mod tls;
pub mod validation;

pub use compile::{compile, CompileReport};
pub use detect::{detect, SchemaMode};
pub use field::FieldResolver;
