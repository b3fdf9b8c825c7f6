//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use dbmon::config::{load_config, load_config_or_default, CompileDefaults};
use dbmon::domain::DbmonError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DBMON_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DBMON_APPLICATION_OUTPUT_FORMAT");
    std::env::remove_var("DBMON_DEFAULTS_ENVIRONMENT");
    std::env::remove_var("DBMON_DEFAULTS_MYSQL_PORT");
    std::env::remove_var("DBMON_DEFAULTS_INTERVAL");
    std::env::remove_var("TEST_DBMON_DEPLOY_ENV");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
output_format = "json"

[defaults]
environment = "staging"
mysql_port = 3307
postgres_port = 6432
interval = "1m"
timeout = "20s"
query_metrics_interval = "5m"
max_sql_query_length = 2048
query_response_time_threshold = 250
query_count_threshold = 50
custom_queries_dir = "/opt/queries"

[logging]
local_enabled = true
local_path = "/tmp/dbmon-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.output_format, "json");
    assert_eq!(config.defaults.environment, "staging");
    assert_eq!(config.defaults.mysql_port, 3307);
    assert_eq!(config.defaults.postgres_port, 6432);
    assert_eq!(config.defaults.interval, "1m");
    assert_eq!(config.defaults.max_sql_query_length, 2048);
    assert_eq!(config.defaults.custom_queries_dir, "/opt/queries");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[defaults]\nenvironment = \"qa\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.application.output_format, "yaml");
    assert_eq!(config.defaults.environment, "qa");
    assert_eq!(config.defaults.mysql_port, 3306);
    assert_eq!(config.defaults.interval, "30s");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_or_default("/nonexistent/dbmon.toml").unwrap();
    assert_eq!(config.defaults, CompileDefaults::default());

    let err = load_config("/nonexistent/dbmon.toml").unwrap_err();
    assert!(matches!(err, DbmonError::Configuration(_)));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_DBMON_DEPLOY_ENV", "canary");

    let file = write_config(
        r#"
# environment = "${TEST_DBMON_COMMENTED_OUT}"
[defaults]
environment = "${TEST_DBMON_DEPLOY_ENV}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.defaults.environment, "canary");

    std::env::remove_var("TEST_DBMON_DEPLOY_ENV");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DBMON_DEPLOY_ENV"));

    cleanup_env_vars();
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("DBMON_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("DBMON_DEFAULTS_ENVIRONMENT", "override-env");
    std::env::set_var("DBMON_DEFAULTS_MYSQL_PORT", "33060");

    let file = write_config("[defaults]\nenvironment = \"from-file\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.defaults.environment, "override-env");
    assert_eq!(config.defaults.mysql_port, 33060);

    // Overrides also apply when no file exists
    let config = load_config_or_default("/nonexistent/dbmon.toml").unwrap();
    assert_eq!(config.defaults.environment, "override-env");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"verbose\"\n",
        "[application]\noutput_format = \"xml\"\n",
        "[defaults]\ninterval = \"30 seconds\"\n",
        "[defaults]\nmysql_port = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, DbmonError::Configuration(_)),
            "expected configuration error for {contents:?}"
        );
    }
}

#[test]
fn test_env_var_override_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("DBMON_DEFAULTS_INTERVAL", "soon");

    let result = load_config_or_default("/nonexistent/dbmon.toml");
    cleanup_env_vars();

    assert!(matches!(result, Err(DbmonError::Configuration(_))));
}
