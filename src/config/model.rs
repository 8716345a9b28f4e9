//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a linetrace run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Diff settings
    // =========================================================================
    /// Which diff backend produces the full-context diffs.
    #[serde(default)]
    pub diff_backend: DiffBackend,

    /// Git executable used by the `git` backend.
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    // =========================================================================
    // Processing settings
    // =========================================================================
    /// Maximum number of files folded concurrently (1 = sequential).
    #[serde(default = "default_max_parallel_files")]
    pub max_parallel_files: usize,

    /// What to do when a single file's history cannot be reconciled.
    #[serde(default)]
    pub on_file_error: FileErrorPolicy,

    // =========================================================================
    // Display settings
    // =========================================================================
    /// Unit of the timestamps found in the input history.
    #[serde(default)]
    pub timestamp_unit: TimestampUnit,

    /// Timezone used when rendering human-readable datetimes.
    #[serde(default)]
    pub display_timezone: DisplayTimezone,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diff_backend: DiffBackend::default(),
            git_binary: default_git_binary(),
            max_parallel_files: default_max_parallel_files(),
            on_file_error: FileErrorPolicy::default(),
            timestamp_unit: TimestampUnit::default(),
            display_timezone: DisplayTimezone::default(),
        }
    }
}
