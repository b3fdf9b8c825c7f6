//! Domain error types
//!
//! This module defines the error hierarchy for dbmon. Errors are split in two
//! families:
//!
//! - [`DbmonError`] for failures that abort a whole run (malformed documents,
//!   configuration, I/O)
//! - [`EntryError`] for failures scoped to a single database entry; these are
//!   collected into the compile report and never stop sibling entries

use std::fmt;
use thiserror::Error;

use super::entry::Engine;

/// Main dbmon error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum DbmonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input document is not a valid inventory at all
    #[error("Document error: {0}")]
    Document(String),

    /// Invalid arguments or settings that are not tied to a single entry
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Entry-scoped errors
///
/// Any of these moves a single entry to the rejected set. The error carries
/// only the reason; the entry identity is attached by [`RejectedEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Structurally malformed entry, detected before resolution
    #[error("Validation error: {0}")]
    Validation(String),

    /// Username or password could not be resolved
    #[error("Credential error: {0}")]
    Credential(String),

    /// A mandatory field (host) has no applicable value
    #[error("Resolution error: {0}")]
    Resolution(String),
}

impl EntryError {
    /// Short kind name used in reports and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            EntryError::Validation(_) => "validation",
            EntryError::Credential(_) => "credential",
            EntryError::Resolution(_) => "resolution",
        }
    }
}

/// Identity of an entry within the input document
///
/// Rendered as `mysql_databases[2] (orders-db)` so that operators can find
/// the offending record in the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    /// Engine list the entry was read from
    pub engine: Engine,

    /// Zero-based position in that list
    pub index: usize,

    /// Explicit name, when the entry carries one
    pub name: Option<String>,
}

impl EntryRef {
    /// Creates a new entry reference
    pub fn new(engine: Engine, index: usize, name: Option<String>) -> Self {
        Self {
            engine,
            index,
            name,
        }
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.engine.list_key(), self.index)?;
        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

/// An entry that failed to compile, with its identity attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entry}: {error}")]
pub struct RejectedEntry {
    /// Which entry was rejected
    pub entry: EntryRef,

    /// Why it was rejected
    pub error: EntryError,
}

impl RejectedEntry {
    /// Creates a new rejected entry record
    pub fn new(entry: EntryRef, error: EntryError) -> Self {
        Self { entry, error }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for DbmonError {
    fn from(err: std::io::Error) -> Self {
        DbmonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DbmonError {
    fn from(err: serde_json::Error) -> Self {
        DbmonError::Serialization(err.to_string())
    }
}

// Conversion from serde_yaml::Error
impl From<serde_yaml::Error> for DbmonError {
    fn from(err: serde_yaml::Error) -> Self {
        DbmonError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DbmonError {
    fn from(err: toml::de::Error) -> Self {
        DbmonError::Configuration(format!("TOML parse error: {err}"))
    }
}
