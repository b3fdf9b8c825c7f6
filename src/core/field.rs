//! Cascading field lookup over a raw inventory entry
//!
//! Every resolver expresses precedence as an ordered list of dotted paths,
//! most specific first, e.g. `["connection.port", "port"]`. The first path
//! that is present and non-null wins; otherwise the caller's default is
//! used. Keeping this in one place means the "nested enhanced field, else
//! legacy flat field, else global default, else hard-coded default" rule is
//! implemented exactly once.
//!
//! Typed accessors skip candidates whose value has the wrong shape, so a
//! lookup is total. Structural problems are reported separately by the
//! validator.

use serde_json::Value;
use std::collections::BTreeMap;

/// Read-only view over one entry
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    entry: &'a Value,
}

impl<'a> FieldResolver<'a> {
    /// Wraps an entry value
    pub fn new(entry: &'a Value) -> Self {
        Self { entry }
    }

    /// Returns the raw entry
    pub fn entry(&self) -> &'a Value {
        self.entry
    }

    /// Looks up a single dotted path, treating `null` as absent
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut current = self.entry;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Whether a dotted path is present and non-null
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Returns the first present candidate
    pub fn first(&self, candidates: &[&str]) -> Option<&'a Value> {
        candidates.iter().find_map(|path| self.lookup(path))
    }

    /// Returns the first present candidate, else `default`
    pub fn resolve(&self, candidates: &[&str], default: Value) -> Value {
        self.first(candidates).cloned().unwrap_or(default)
    }

    /// First candidate readable as a string
    ///
    /// Numbers are accepted and rendered in decimal, since YAML inventories
    /// often carry numeric-looking identifiers unquoted.
    pub fn string(&self, candidates: &[&str]) -> Option<String> {
        candidates
            .iter()
            .filter_map(|path| self.lookup(path))
            .find_map(as_string)
    }

    /// First candidate readable as a non-blank string
    pub fn non_empty_string(&self, candidates: &[&str]) -> Option<String> {
        candidates
            .iter()
            .filter_map(|path| self.lookup(path))
            .filter_map(as_string)
            .find(|s| !s.trim().is_empty())
    }

    /// First candidate readable as a non-blank string, else `default`
    pub fn string_or(&self, candidates: &[&str], default: &str) -> String {
        self.non_empty_string(candidates)
            .unwrap_or_else(|| default.to_string())
    }

    /// First candidate readable as a boolean
    pub fn boolean(&self, candidates: &[&str]) -> Option<bool> {
        candidates
            .iter()
            .filter_map(|path| self.lookup(path))
            .find_map(as_bool)
    }

    /// First candidate readable as a boolean, else `default`
    pub fn boolean_or(&self, candidates: &[&str], default: bool) -> bool {
        self.boolean(candidates).unwrap_or(default)
    }

    /// First candidate readable as a non-negative integer
    pub fn integer(&self, candidates: &[&str]) -> Option<u64> {
        candidates
            .iter()
            .filter_map(|path| self.lookup(path))
            .find_map(as_u64)
    }

    /// First candidate readable as a non-negative integer, else `default`
    pub fn integer_or(&self, candidates: &[&str], default: u64) -> u64 {
        self.integer(candidates).unwrap_or(default)
    }

    /// First candidate that is a mapping, with scalar values rendered as strings
    ///
    /// Non-scalar values inside the mapping are dropped.
    pub fn string_map(&self, candidates: &[&str]) -> Option<BTreeMap<String, String>> {
        candidates
            .iter()
            .filter_map(|path| self.lookup(path))
            .find_map(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
                    .collect()
            })
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" => Some(true),
            "false" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
