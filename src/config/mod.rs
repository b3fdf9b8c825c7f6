//! Configuration management for dbmon.
//!
//! This module provides TOML-based loading of the compiler configuration.
//! The configuration is optional: every setting has a built-in default, and
//! the `[defaults]` section becomes the immutable [`CompileDefaults`] table
//! consulted when an inventory entry leaves a field unset.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! output_format = "yaml"
//!
//! [defaults]
//! environment = "${DEPLOY_ENV}"
//! interval = "30s"
//! timeout = "10s"
//! mysql_port = 3306
//! postgres_port = 5432
//!
//! [logging]
//! local_enabled = false
//! local_path = "/var/log/dbmon"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and
//! `DBMON_<SECTION>_<KEY>` variables override individual settings after
//! parsing (for example `DBMON_DEFAULTS_ENVIRONMENT=staging`).

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, CompileDefaults, DbmonConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
