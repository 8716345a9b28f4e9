//! Captured version history input.

use crate::error::{Result, TraceError};
use crate::timefmt::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Captured versions of one file, oldest first.
///
/// Each version is the whole file as ordered lines; `timestamps[i]` is when
/// `versions[i]` was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistory {
    #[serde(default)]
    pub versions: Vec<Vec<String>>,
    #[serde(default)]
    pub timestamps: Vec<Timestamp>,
}

impl FileHistory {
    pub fn new(versions: Vec<Vec<String>>, timestamps: Vec<Timestamp>) -> Self {
        Self {
            versions,
            timestamps,
        }
    }

    /// Check that every version has exactly one timestamp.
    pub fn validate(&self) -> Result<()> {
        if self.versions.len() != self.timestamps.len() {
            return Err(TraceError::InputFault(format!(
                "{} versions but {} timestamps",
                self.versions.len(),
                self.timestamps.len()
            )));
        }
        Ok(())
    }
}

/// File path -> captured history, iterated in path order.
pub type History = BTreeMap<String, FileHistory>;

/// Load a history document (`{ path: { versions, timestamps } }`) from JSON.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<History> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        TraceError::UserError(format!(
            "failed to read history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TraceError::UserError(format!(
            "failed to parse history file '{}': {}",
            path.display(),
            e
        ))
    })
}
