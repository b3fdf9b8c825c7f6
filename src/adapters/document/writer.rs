//! Output rendering and writing

use crate::domain::context::ResultExt;
use crate::domain::errors::DbmonError;
use crate::domain::result::Result;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML, the agent's native configuration format
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid output format '{other}'. Must be one of: yaml, json"
            )),
        }
    }
}

/// Renders a value in the given format
///
/// Map ordering comes from the value itself; with `BTreeMap` fields the
/// output is byte-identical across runs.
///
/// # Errors
///
/// Returns [`DbmonError::Serialization`] if the value cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Writes `contents` to `path` atomically
///
/// The data goes to a sibling temporary file that is renamed over the
/// target, so readers never observe a partial file. On Unix the file is
/// created with mode 0600 since it may hold plaintext passwords.
///
/// # Errors
///
/// Returns [`DbmonError::Io`] if any filesystem step fails; the temporary
/// file is removed in that case.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path)?;

    let result = write_temp(&tmp, contents).and_then(|()| {
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move output into place at {}", path.display()))
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote output");
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| DbmonError::Io(format!("Invalid output path: {}", path.display())))?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    Ok(path.with_file_name(tmp_name))
}

fn write_temp(tmp: &Path, contents: &str) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(tmp)
        .with_context(|| format!("Failed to create {}", tmp.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync {}", tmp.display()))?;
    Ok(())
}
