//! Configuration types and defaults for linetrace.
//!
//! This module defines enums and default value functions used by the
//! Config struct.

use serde::{Deserialize, Serialize};

/// Diff backend used to produce full-context diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiffBackend {
    /// In-process Myers diff (default, no external tools needed).
    #[default]
    Imara,
    /// `git diff --no-index` subprocess.
    Git,
}

impl DiffBackend {
    /// Parse a diff backend from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "imara" => Some(Self::Imara),
            "git" => Some(Self::Git),
            _ => None,
        }
    }
}

/// Policy when one file's history cannot be reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorPolicy {
    /// Abort the whole run on the first faulty file (default, safest).
    #[default]
    Fail,
    /// Drop the faulty file and report it alongside the snapshot.
    Skip,
}

/// Unit of the raw timestamp scalars in the input history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestampUnit {
    Seconds,
    Millis,
    /// Microseconds since the Unix epoch (what editor capture records).
    #[default]
    Micros,
}

/// Timezone used to render human-readable datetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTimezone {
    Utc,
    /// The machine's local timezone, as editor capture tools display it.
    #[default]
    Local,
}

// Default value functions for serde
pub(crate) fn default_git_binary() -> String {
    "git".to_string()
}
pub(crate) fn default_max_parallel_files() -> usize {
    1
}
