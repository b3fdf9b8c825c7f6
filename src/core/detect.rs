//! Schema mode detection
//!
//! A document is in enhanced mode as soon as any entry, in either engine
//! list, carries a non-empty `provider`. The decision is made once per
//! document. It only selects which advisory checks the validator runs;
//! field resolution reads both shapes regardless.

use crate::domain::Engine;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Input schema family of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Flat `host`/`user`/`password` fields
    #[default]
    Legacy,
    /// Nested `connection`/`credentials`/`monitoring` blocks with a provider
    Enhanced,
}

impl fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaMode::Legacy => f.write_str("legacy"),
            SchemaMode::Enhanced => f.write_str("enhanced"),
        }
    }
}

/// Classifies a raw document
///
/// Never fails: anything that is not a recognisable inventory is legacy.
pub fn detect(document: &Value) -> SchemaMode {
    detect_entries(
        Engine::ALL
            .iter()
            .filter_map(|engine| document.get(engine.list_key()))
            .filter_map(Value::as_array)
            .flatten(),
    )
}

/// Classifies the entries of both engine lists
pub fn detect_entries<'a>(entries: impl IntoIterator<Item = &'a Value>) -> SchemaMode {
    if entries.into_iter().any(has_provider) {
        SchemaMode::Enhanced
    } else {
        SchemaMode::Legacy
    }
}

fn has_provider(entry: &Value) -> bool {
    entry
        .get("provider")
        .and_then(Value::as_str)
        .is_some_and(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_legacy() {
        assert_eq!(detect(&json!({})), SchemaMode::Legacy);
        assert_eq!(detect(&json!(null)), SchemaMode::Legacy);
    }

    #[test]
    fn test_flat_entries_are_legacy() {
        let doc = json!({
            "mysql_databases": [{"host": "db", "user": "nr", "password": "x"}]
        });
        assert_eq!(detect(&doc), SchemaMode::Legacy);
    }

    #[test]
    fn test_single_provider_makes_document_enhanced() {
        let doc = json!({
            "mysql_databases": [{"host": "db", "user": "nr", "password": "x"}],
            "postgresql_databases": [
                {"host": "pg", "user": "nr", "password": "x"},
                {"provider": "rds", "connection": {"endpoint": "pg.rds"}}
            ]
        });
        assert_eq!(detect(&doc), SchemaMode::Enhanced);
    }

    #[test]
    fn test_blank_provider_ignored() {
        let doc = json!({"mysql_databases": [{"provider": " ", "host": "db"}]});
        assert_eq!(detect(&doc), SchemaMode::Legacy);
    }

    #[test]
    fn test_display() {
        assert_eq!(SchemaMode::Enhanced.to_string(), "enhanced");
        assert_eq!(SchemaMode::Legacy.to_string(), "legacy");
    }
}
