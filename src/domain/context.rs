//! Error context extension trait
//!
//! Adds `.context()` / `.with_context()` to any result whose error converts
//! into [`DbmonError`], keeping library code on the typed error instead of
//! `anyhow`.
//!
//! # Examples
//!
//! ```rust
//! use dbmon::domain::Result;
//! use dbmon::domain::context::ResultExt;
//!
//! fn read_inventory(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read inventory: {path}"))
//! }
//! ```

use crate::domain::errors::DbmonError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display;

    /// Add context to an error, computed only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C;
}

/// The variant of the underlying error is kept so callers can still map it
/// to an exit code; only the message is prefixed.
impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DbmonError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display,
    {
        self.map_err(|e| prefix(e.into(), &context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| prefix(e.into(), &f()))
    }
}

fn prefix(error: DbmonError, context: &dyn std::fmt::Display) -> DbmonError {
    match error {
        DbmonError::Configuration(msg) => DbmonError::Configuration(format!("{context}: {msg}")),
        DbmonError::Document(msg) => DbmonError::Document(format!("{context}: {msg}")),
        DbmonError::Validation(msg) => DbmonError::Validation(format!("{context}: {msg}")),
        DbmonError::Serialization(msg) => DbmonError::Serialization(format!("{context}: {msg}")),
        DbmonError::Io(msg) => DbmonError::Io(format!("{context}: {msg}")),
        DbmonError::Other(msg) => DbmonError::Other(format!("{context}: {msg}")),
    }
}
