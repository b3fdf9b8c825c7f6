//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a single
//! test initializes it.

use dbmon::config::{CompileDefaults, LoggingConfig};
use dbmon::core::compile;
use dbmon::logging::init_logging;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/dbmon");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    // Exercise the per-entry events; the password must not reach the log file
    let document = json!({"mysql_databases": [
        {"host": "db.local", "user": "nr", "password": "hunter2"},
        {"user": "nr", "password": "hunter2"}
    ]});
    let report = compile(&document, &CompileDefaults::default()).unwrap();
    assert_eq!(report.rejected.len(), 1);

    drop(guard);

    let log_file = log_path.join("dbmon.log");
    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Entry rejected"));
    assert!(contents.contains("mysql_databases[1]"));
    assert!(!contents.contains("hunter2"));
}

#[test]
fn test_invalid_log_level() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}
