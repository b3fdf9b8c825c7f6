//! Inventory reading
//!
//! YAML is a superset of JSON, so both input formats go through `serde_yaml`.
//! The tree stays a `serde_yaml::Value`; the document compiler converts it
//! entry by entry.

use crate::domain::context::ResultExt;
use crate::domain::errors::DbmonError;
use crate::domain::result::Result;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Parses inventory text (YAML or JSON)
///
/// # Errors
///
/// Returns [`DbmonError::Document`] when the text is not valid YAML/JSON.
pub fn parse_document(contents: &str) -> Result<Value> {
    serde_yaml::from_str(contents)
        .map_err(|e| DbmonError::Document(format!("failed to parse inventory: {e}")))
}

/// Reads and parses an inventory file
///
/// # Errors
///
/// Returns [`DbmonError::Io`] when the file cannot be read, and
/// [`DbmonError::Document`] when it cannot be parsed.
pub fn read_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Read inventory");
    parse_document(&contents).with_context(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_yaml() {
        let doc = parse_document(
            r#"
mysql_databases:
  - host: db1.local
    port: 3306
    enabled: true
"#,
        )
        .unwrap();
        let entry = &doc["mysql_databases"][0];
        assert_eq!(entry["host"].as_str(), Some("db1.local"));
        assert_eq!(entry["port"].as_u64(), Some(3306));
        assert_eq!(entry["enabled"].as_bool(), Some(true));
    }

    #[test]
    fn test_parse_json() {
        let doc = parse_document(r#"{"postgresql_databases": [{"host": "pg"}]}"#).unwrap();
        assert_eq!(doc["postgresql_databases"][0]["host"].as_str(), Some("pg"));
    }

    #[test]
    fn test_parse_error_is_document_error() {
        let err = parse_document("mysql_databases: [unclosed").unwrap_err();
        assert!(matches!(err, DbmonError::Document(_)));
    }

    #[test]
    fn test_non_string_keys_are_kept_for_the_compiler() {
        let doc = parse_document("mysql_databases:\n  - host: a\n    labels: {~: x}\n").unwrap();
        assert!(doc["mysql_databases"][0]["labels"].is_mapping());
    }

    #[test]
    fn test_read_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "mysql_databases: []").unwrap();

        let doc = read_document(file.path()).unwrap();
        assert_eq!(doc["mysql_databases"].as_sequence().map(Vec::len), Some(0));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_document("/nonexistent/inventory.yml").unwrap_err();
        assert!(matches!(err, DbmonError::Io(_)));
    }
}
