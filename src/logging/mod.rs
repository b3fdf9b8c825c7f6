//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - Configurable log levels (or `RUST_LOG`)
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use dbmon::logging::init_logging;
//! use dbmon::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Compilation started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an entry that was rejected during compilation
///
/// # Example
///
/// ```no_run
/// use dbmon::log_entry_rejected;
/// use dbmon::domain::{Engine, EntryError, EntryRef, RejectedEntry};
///
/// let rejected = RejectedEntry::new(
///     EntryRef::new(Engine::Mysql, 0, None),
///     EntryError::Resolution("no host".to_string()),
/// );
/// log_entry_rejected!(&rejected);
/// ```
#[macro_export]
macro_rules! log_entry_rejected {
    ($rejected:expr) => {
        tracing::warn!(
            entry = %$rejected.entry,
            kind = $rejected.error.kind(),
            error = %$rejected.error,
            "Entry rejected"
        );
    };
}

/// Log the completion of a compilation run
///
/// # Example
///
/// ```no_run
/// use dbmon::log_compile_complete;
///
/// log_compile_complete!(9, 1, 0);
/// ```
#[macro_export]
macro_rules! log_compile_complete {
    ($compiled:expr, $rejected:expr, $skipped:expr) => {
        tracing::info!(
            compiled = $compiled,
            rejected = $rejected,
            skipped = $skipped,
            "Compilation completed"
        );
    };
}
