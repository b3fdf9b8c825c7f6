//! Inventory compilation
//!
//! - [`entry`] - Compiles a single entry through validation and the resolvers
//! - [`document`] - Compiles a whole document with per-entry isolation
//! - [`report`] - Compile outcome and output document

pub mod document;
pub mod entry;
pub mod report;

pub use document::{compile, InventoryDocument};
pub use entry::{compile_entry, CompiledEntry};
pub use report::{CompileReport, EntryWarning, IntegrationsDocument};
