//! Document compilation
//!
//! Walks `mysql_databases` then `postgresql_databases`, compiling each entry
//! independently. A failing entry is recorded and its siblings continue;
//! only a structurally broken document aborts.

use super::entry::{compile_entry, explicit_name};
use super::report::{CompileReport, EntryWarning};
use crate::config::CompileDefaults;
use crate::core::detect::detect_entries;
use crate::core::field::FieldResolver;
use crate::domain::{DbmonError, Engine, EntryError, EntryRef, RejectedEntry, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;

/// Inventory document in either supported tree representation
///
/// YAML trees are converted to JSON one entry at a time, so a value with no
/// JSON equivalent (e.g. a non-string mapping key) only rejects its entry.
#[derive(Debug, Clone, Copy)]
pub enum InventoryDocument<'a> {
    Json(&'a Value),
    Yaml(&'a serde_yaml::Value),
}

impl<'a> From<&'a Value> for InventoryDocument<'a> {
    fn from(document: &'a Value) -> Self {
        InventoryDocument::Json(document)
    }
}

impl<'a> From<&'a serde_yaml::Value> for InventoryDocument<'a> {
    fn from(document: &'a serde_yaml::Value) -> Self {
        InventoryDocument::Yaml(document)
    }
}

/// One list element, or the reason it could not be read
type RawEntry<'a> = std::result::Result<Cow<'a, Value>, String>;

impl<'a> InventoryDocument<'a> {
    fn entries(self, engine: Engine) -> Result<Vec<RawEntry<'a>>> {
        let key = engine.list_key();
        let not_a_list = || DbmonError::Document(format!("'{key}' must be a list"));

        match self {
            InventoryDocument::Json(document) => {
                let root = document.as_object().ok_or_else(not_a_mapping)?;
                match root.get(key) {
                    None | Some(Value::Null) => Ok(Vec::new()),
                    Some(Value::Array(entries)) => {
                        Ok(entries.iter().map(|entry| Ok(Cow::Borrowed(entry))).collect())
                    }
                    Some(_) => Err(not_a_list()),
                }
            }
            InventoryDocument::Yaml(document) => {
                let root = document.as_mapping().ok_or_else(not_a_mapping)?;
                match root.get(key) {
                    None | Some(serde_yaml::Value::Null) => Ok(Vec::new()),
                    Some(serde_yaml::Value::Sequence(entries)) => Ok(entries
                        .iter()
                        .map(|entry| {
                            serde_json::to_value(entry)
                                .map(Cow::Owned)
                                .map_err(|e| e.to_string())
                        })
                        .collect()),
                    Some(_) => Err(not_a_list()),
                }
            }
        }
    }
}

fn not_a_mapping() -> DbmonError {
    DbmonError::Document("top level must be a mapping".to_string())
}

/// Compiles an inventory document
///
/// Accepts a `serde_json::Value` or a `serde_yaml::Value`.
///
/// # Errors
///
/// Returns [`DbmonError::Document`] when the top level is not a mapping or an
/// engine list is present but not a sequence.
pub fn compile<'a>(
    document: impl Into<InventoryDocument<'a>>,
    defaults: &CompileDefaults,
) -> Result<CompileReport> {
    let document = document.into();

    let mut lists = Vec::with_capacity(Engine::ALL.len());
    for engine in Engine::ALL {
        lists.push((engine, document.entries(engine)?));
    }

    let mode = detect_entries(
        lists
            .iter()
            .flat_map(|(_, entries)| entries.iter().filter_map(|entry| entry.as_deref().ok())),
    );
    tracing::info!(%mode, "Detected schema mode");

    let mut report = CompileReport::new(mode);
    let mut claimed_names: HashSet<String> = HashSet::new();

    for (engine, entries) in &lists {
        let engine = *engine;
        for (index, entry) in entries.iter().enumerate() {
            let entry = match entry {
                Ok(entry) => &**entry,
                Err(reason) => {
                    reject(
                        &mut report,
                        EntryRef::new(engine, index, None),
                        EntryError::Validation(format!("unsupported value in entry: {reason}")),
                    );
                    continue;
                }
            };

            let name = explicit_name(entry);
            let entry_ref = EntryRef::new(engine, index, name.clone());

            if FieldResolver::new(entry).boolean(&["enabled"]) == Some(false) {
                tracing::debug!(entry = %entry_ref, "Skipping disabled entry");
                report.skipped += 1;
                continue;
            }

            // A name belongs to the first entry that compiles under it
            if let Some(name) = name.as_ref().filter(|name| claimed_names.contains(*name)) {
                reject(
                    &mut report,
                    entry_ref,
                    EntryError::Validation(format!("duplicate name '{name}'")),
                );
                continue;
            }

            match compile_entry(engine, entry, mode, defaults) {
                Ok(compiled) => {
                    tracing::debug!(
                        entry = %entry_ref,
                        engine = %engine,
                        provider = %compiled.entry.provider,
                        "Entry compiled"
                    );
                    if let Some(name) = name {
                        claimed_names.insert(name);
                    }
                    report
                        .warnings
                        .extend(compiled.warnings.into_iter().map(|message| EntryWarning {
                            entry: entry_ref.clone(),
                            message,
                        }));
                    report.compiled.push(compiled.entry);
                }
                Err(error) => reject(&mut report, entry_ref, error),
            }
        }
    }

    report.log_summary();
    Ok(report)
}

fn reject(report: &mut CompileReport, entry: EntryRef, error: EntryError) {
    let rejected = RejectedEntry::new(entry, error);
    crate::log_entry_rejected!(&rejected);
    report.rejected.push(rejected);
}
