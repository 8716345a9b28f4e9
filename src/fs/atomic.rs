//! Atomic output writes.
//!
//! Content goes to a temporary file in the target's directory, is synced,
//! and is then persisted over the target. Readers never observe a partially
//! written snapshot, and a failed run leaves any previous output in place.

use crate::error::{Result, TraceError};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically replace `path` with `content`, creating parent directories.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| {
            TraceError::UserError(format!(
                "failed to create output directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| {
        TraceError::UserError(format!(
            "failed to create temporary file in '{}': {}",
            parent.display(),
            e
        ))
    })?;

    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| TraceError::UserError(format!("failed to write temporary file: {}", e)))?;

    // Dropping the temp file on error removes it.
    temp.persist(path).map_err(|e| {
        TraceError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e.error
        ))
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}

/// Serialize `value` as pretty JSON (with trailing newline) and write it atomically.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| TraceError::UserError(format!("failed to serialize output: {}", e)))?;
    json.push('\n');
    atomic_write(path, json.as_bytes())
}
