//! Domain models and types for dbmon.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Closed variant sets** ([`Engine`], [`Provider`], [`PasswordSource`])
//! - **Output records** ([`ResolvedEntry`], [`EnvValue`], [`SecretRef`])
//! - **Error types** ([`DbmonError`], [`EntryError`], [`RejectedEntry`])
//! - **Result type alias** ([`Result`]) and a context extension ([`context::ResultExt`])
//!
//! # Error Handling
//!
//! Fatal operations return [`Result<T, DbmonError>`]. Failures that concern a
//! single inventory entry are reported as [`EntryError`] and never abort the
//! run:
//!
//! ```rust
//! use dbmon::domain::{Engine, EntryError, EntryRef, RejectedEntry};
//!
//! let rejected = RejectedEntry::new(
//!     EntryRef::new(Engine::Mysql, 0, Some("orders".to_string())),
//!     EntryError::Credential("missing password_key".to_string()),
//! );
//! assert_eq!(rejected.error.kind(), "credential");
//! ```

pub mod context;
pub mod entry;
pub mod errors;
pub mod resolved;
pub mod result;

// Re-export commonly used types for convenience
pub use entry::{Engine, PasswordSource, Provider};
pub use errors::{DbmonError, EntryError, EntryRef, RejectedEntry};
pub use resolved::{EnvValue, ResolvedEntry, SecretRef};
pub use result::Result;
