//! Inventory and integration document I/O
//!
//! Reads YAML/JSON inventories into a `serde_json::Value` and renders
//! compiled integration documents back to YAML or JSON.

pub mod reader;
pub mod writer;

pub use reader::{parse_document, read_document};
pub use writer::{render, write_atomic, OutputFormat};
