//! Configuration schema types
//!
//! This module defines the structure of the compiler configuration file
//! (`dbmon.toml`). The `[defaults]` section is the immutable global defaults
//! table handed to the document compiler.

use crate::domain::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Main dbmon configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbmonConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Global defaults applied when an entry leaves a field unset
    #[serde(default)]
    pub defaults: CompileDefaults,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DbmonConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.defaults.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rendering of the compiled document (yaml or json)
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["yaml", "json"];
        if !valid_formats.contains(&self.output_format.as_str()) {
            return Err(format!(
                "Invalid output_format '{}'. Must be one of: {}",
                self.output_format,
                valid_formats.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_format: default_output_format(),
        }
    }
}

/// Global defaults table
///
/// Sits between the per-entry fields and the hard-coded defaults in the
/// resolution chain: nested field, legacy flat field, this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileDefaults {
    /// Value of the `env` label when an entry does not set one
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Port used for MySQL entries without one
    #[serde(default = "default_mysql_port")]
    pub mysql_port: u16,

    /// Port used for PostgreSQL entries without one
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    /// Collection interval
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Collection timeout
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Query sampling interval
    #[serde(default = "default_query_metrics_interval")]
    pub query_metrics_interval: String,

    /// Maximum captured SQL text length
    #[serde(default = "default_max_sql_query_length")]
    pub max_sql_query_length: u64,

    /// Slow query threshold in milliseconds
    #[serde(default = "default_query_response_time_threshold")]
    pub query_response_time_threshold: u64,

    /// Maximum number of queries reported per interval
    #[serde(default = "default_query_count_threshold")]
    pub query_count_threshold: u64,

    /// Directory holding the per-engine default custom query files
    #[serde(default = "default_custom_queries_dir")]
    pub custom_queries_dir: String,
}

impl CompileDefaults {
    /// Default port for an engine
    pub fn port_for(&self, engine: Engine) -> u16 {
        match engine {
            Engine::Mysql => self.mysql_port,
            Engine::Postgresql => self.postgres_port,
        }
    }

    /// Default custom query file for an engine
    pub fn custom_query_file(&self, engine: Engine) -> String {
        format!(
            "{}/{}-custom-queries.yml",
            self.custom_queries_dir.trim_end_matches('/'),
            engine.as_str()
        )
    }

    fn validate(&self) -> Result<(), String> {
        if self.environment.trim().is_empty() {
            return Err("defaults.environment cannot be empty".to_string());
        }

        if self.mysql_port == 0 || self.postgres_port == 0 {
            return Err("defaults ports must be between 1 and 65535".to_string());
        }

        for (field, value) in [
            ("interval", &self.interval),
            ("timeout", &self.timeout),
            ("query_metrics_interval", &self.query_metrics_interval),
        ] {
            if !is_valid_interval(value) {
                return Err(format!(
                    "Invalid defaults.{field} '{value}' - use format like '30s', '5m', '1h'"
                ));
            }
        }

        if !(1..=10_000).contains(&self.max_sql_query_length) {
            return Err("defaults.max_sql_query_length must be between 1 and 10000".to_string());
        }

        if self.custom_queries_dir.trim().is_empty() {
            return Err("defaults.custom_queries_dir cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for CompileDefaults {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            mysql_port: default_mysql_port(),
            postgres_port: default_postgres_port(),
            interval: default_interval(),
            timeout: default_timeout(),
            query_metrics_interval: default_query_metrics_interval(),
            max_sql_query_length: default_max_sql_query_length(),
            query_response_time_threshold: default_query_response_time_threshold(),
            query_count_threshold: default_query_count_threshold(),
            custom_queries_dir: default_custom_queries_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Checks an agent interval such as `30s`, `5m` or `1h`
pub fn is_valid_interval(value: &str) -> bool {
    static INTERVAL: OnceLock<Regex> = OnceLock::new();
    INTERVAL
        .get_or_init(|| Regex::new(r"^\d+[smh]$").expect("interval pattern is valid"))
        .is_match(value)
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_format() -> String {
    "yaml".to_string()
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_interval() -> String {
    "30s".to_string()
}

fn default_timeout() -> String {
    "10s".to_string()
}

fn default_query_metrics_interval() -> String {
    "60s".to_string()
}

fn default_max_sql_query_length() -> u64 {
    1000
}

fn default_query_response_time_threshold() -> u64 {
    500
}

fn default_query_count_threshold() -> u64 {
    20
}

fn default_custom_queries_dir() -> String {
    "/etc/newrelic-infra/integrations.d".to_string()
}

fn default_local_path() -> String {
    "/var/log/dbmon".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
