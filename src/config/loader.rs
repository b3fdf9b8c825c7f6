//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DbmonConfig;
use crate::domain::errors::DbmonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DbmonConfig
/// 4. Applies environment variable overrides (DBMON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dbmon::config::loader::load_config;
///
/// let config = load_config("dbmon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DbmonConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DbmonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DbmonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to built-in defaults when the file is absent
///
/// Compiling an inventory does not require a configuration file; every
/// setting has a default. A file that exists but is invalid is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DbmonConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        config_path = %path.display(),
        "Configuration file not found, using built-in defaults"
    );
    finish(DbmonConfig::default())
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<DbmonConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: DbmonConfig = toml::from_str(&contents)
        .map_err(|e| DbmonError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: DbmonConfig) -> Result<DbmonConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DbmonError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DbmonError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comments are copied verbatim
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DbmonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DBMON_* prefix
///
/// Environment variables follow the pattern: DBMON_<SECTION>_<KEY>
/// For example: DBMON_DEFAULTS_ENVIRONMENT, DBMON_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut DbmonConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("DBMON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DBMON_APPLICATION_OUTPUT_FORMAT") {
        config.application.output_format = val;
    }

    // Defaults overrides
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_ENVIRONMENT") {
        config.defaults.environment = val;
    }
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_MYSQL_PORT") {
        if let Ok(port) = val.parse() {
            config.defaults.mysql_port = port;
        }
    }
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_POSTGRES_PORT") {
        if let Ok(port) = val.parse() {
            config.defaults.postgres_port = port;
        }
    }
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_INTERVAL") {
        config.defaults.interval = val;
    }
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_TIMEOUT") {
        config.defaults.timeout = val;
    }
    if let Ok(val) = std::env::var("DBMON_DEFAULTS_CUSTOM_QUERIES_DIR") {
        config.defaults.custom_queries_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DBMON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DBMON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
