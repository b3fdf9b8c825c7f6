//! Compile report
//!
//! Collects the outcome of a document compilation: compiled blocks, rejected
//! entries, advisory warnings and the number of disabled entries skipped.

use crate::core::detect::SchemaMode;
use crate::domain::{EntryRef, RejectedEntry, ResolvedEntry};
use serde::Serialize;
use std::fmt;

/// Advisory finding attached to an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWarning {
    /// Entry the warning concerns
    pub entry: EntryRef,

    /// Warning text
    pub message: String,
}

impl fmt::Display for EntryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry, self.message)
    }
}

/// Agent-consumable output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationsDocument<'a> {
    /// One block per compiled entry, MySQL first
    pub integrations: &'a [ResolvedEntry],
}

/// Outcome of compiling one inventory document
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    /// Schema mode the document was detected as
    pub mode: SchemaMode,

    /// Compiled blocks in output order
    pub compiled: Vec<ResolvedEntry>,

    /// Entries that failed, with reasons
    pub rejected: Vec<RejectedEntry>,

    /// Advisory warnings
    pub warnings: Vec<EntryWarning>,

    /// Number of entries with `enabled: false`
    pub skipped: usize,
}

impl CompileReport {
    /// Create a new empty report
    pub fn new(mode: SchemaMode) -> Self {
        Self {
            mode,
            compiled: Vec::new(),
            rejected: Vec::new(),
            warnings: Vec::new(),
            skipped: 0,
        }
    }

    /// Total number of entries seen, including skipped ones
    pub fn total(&self) -> usize {
        self.compiled.len() + self.rejected.len() + self.skipped
    }

    /// At least one entry compiled and at least one was rejected
    pub fn is_partial(&self) -> bool {
        !self.compiled.is_empty() && !self.rejected.is_empty()
    }

    /// No entry was rejected
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Borrows the compiled blocks as the output document
    pub fn to_document(&self) -> IntegrationsDocument<'_> {
        IntegrationsDocument {
            integrations: &self.compiled,
        }
    }

    /// Log the report
    pub fn log_summary(&self) {
        crate::log_compile_complete!(self.compiled.len(), self.rejected.len(), self.skipped);

        if !self.warnings.is_empty() {
            tracing::warn!(
                warning_count = self.warnings.len(),
                "Compilation completed with warnings"
            );
            for warning in &self.warnings {
                tracing::warn!(entry = %warning.entry, message = %warning.message, "Entry warning");
            }
        }
    }
}
