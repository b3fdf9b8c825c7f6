//! CLI command implementations
//!
//! This module contains all CLI command implementations and the exit code
//! mapping they share.

pub mod compile;
pub mod init;
pub mod validate;

use crate::core::CompileReport;
use crate::domain::DbmonError;

/// Every entry compiled (or there were none)
pub const EXIT_SUCCESS: i32 = 0;
/// Some entries compiled, some were rejected
pub const EXIT_PARTIAL: i32 = 1;
/// Configuration or document error
pub const EXIT_CONFIG: i32 = 2;
/// Nothing compiled and at least one entry was rejected
pub const EXIT_ALL_REJECTED: i32 = 3;
/// Fatal error (I/O, serialization)
pub const EXIT_FATAL: i32 = 5;

/// Maps a compile outcome to a process exit code
pub fn report_exit_code(report: &CompileReport) -> i32 {
    if report.is_complete() {
        EXIT_SUCCESS
    } else if report.is_partial() {
        EXIT_PARTIAL
    } else {
        EXIT_ALL_REJECTED
    }
}

/// Maps a fatal error to a process exit code
pub fn error_exit_code(error: &DbmonError) -> i32 {
    match error {
        DbmonError::Configuration(_) | DbmonError::Document(_) | DbmonError::Validation(_) => {
            EXIT_CONFIG
        }
        DbmonError::Io(_) | DbmonError::Serialization(_) | DbmonError::Other(_) => EXIT_FATAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaMode;
    use crate::domain::{Engine, EntryError, EntryRef, RejectedEntry};

    fn rejected() -> RejectedEntry {
        RejectedEntry::new(
            EntryRef::new(Engine::Mysql, 0, None),
            EntryError::Resolution("no host".to_string()),
        )
    }

    #[test]
    fn test_report_exit_codes() {
        let mut report = CompileReport::new(SchemaMode::Legacy);
        assert_eq!(report_exit_code(&report), EXIT_SUCCESS);

        report.rejected.push(rejected());
        assert_eq!(report_exit_code(&report), EXIT_ALL_REJECTED);
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            error_exit_code(&DbmonError::Document("x".into())),
            EXIT_CONFIG
        );
        assert_eq!(
            error_exit_code(&DbmonError::Configuration("x".into())),
            EXIT_CONFIG
        );
        assert_eq!(error_exit_code(&DbmonError::Io("x".into())), EXIT_FATAL);
    }
}
