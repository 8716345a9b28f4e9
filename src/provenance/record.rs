//! Line records and per-file tracking state.

use crate::diff::{DiffProvider, join_lines};
use crate::error::Result;
use crate::timefmt::{TimeFormat, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::reconcile::reconcile;

/// One line of a tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line content, terminator included.
    pub content: String,
    /// When the content was last effectively authored.
    pub last_modified_time: Timestamp,
    /// Whether the content is present in the current head version.
    pub alive: bool,
}

impl LineRecord {
    pub fn new(content: impl Into<String>, last_modified_time: Timestamp) -> Self {
        Self {
            content: content.into(),
            last_modified_time,
            alive: true,
        }
    }

    /// `@ <time> (alive|dead) <content>` with the given time rendering.
    pub fn describe(&self, format: &TimeFormat) -> String {
        format!(
            "@ {} ({}) {}",
            format.render(self.last_modified_time),
            self.status(),
            self.content.trim_end_matches(['\n', '\r'])
        )
    }

    fn status(&self) -> &'static str {
        if self.alive { "alive" } else { "dead" }
    }
}

impl fmt::Display for LineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@ {} ({}) {}",
            self.last_modified_time,
            self.status(),
            self.content.trim_end_matches(['\n', '\r'])
        )
    }
}

/// Base and head line records for one file.
///
/// The base status never changes length; the head status always has one
/// record per line of the most recently applied version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTrackState {
    pub(super) base_status: Vec<LineRecord>,
    pub(super) head_status: Vec<LineRecord>,
    pub(super) base_timestamp: Timestamp,
}

impl FileTrackState {
    /// Start tracking from the base version: every line alive at `timestamp`.
    pub fn new<S: AsRef<str>>(base_version: &[S], timestamp: Timestamp) -> Self {
        let base_status: Vec<LineRecord> = base_version
            .iter()
            .map(|line| LineRecord::new(line.as_ref(), timestamp))
            .collect();

        Self {
            head_status: base_status.clone(),
            base_status,
            base_timestamp: timestamp,
        }
    }

    pub fn base_status(&self) -> &[LineRecord] {
        &self.base_status
    }

    pub fn head_status(&self) -> &[LineRecord] {
        &self.head_status
    }

    pub fn base_timestamp(&self) -> Timestamp {
        self.base_timestamp
    }

    /// Base version text, one `\n`-terminated line per record.
    pub fn base_text(&self) -> String {
        join_lines(&contents(&self.base_status))
    }

    /// Head version text, one `\n`-terminated line per record.
    pub fn head_text(&self) -> String {
        join_lines(&contents(&self.head_status))
    }

    /// Apply a new version in place.
    ///
    /// On error the state is left exactly as it was before the call.
    pub fn apply<S: AsRef<str>>(
        &mut self,
        provider: &dyn DiffProvider,
        new_version: &[S],
        new_timestamp: Timestamp,
    ) -> Result<()> {
        *self = reconcile(self, provider, new_version, new_timestamp)?;
        Ok(())
    }

    /// Two-section table of every record, for debugging.
    pub fn status_table(&self, format: &TimeFormat) -> String {
        let mut table = String::new();
        for (title, records) in [("base", &self.base_status), ("head", &self.head_status)] {
            table.push_str(&format!("{} ({} lines):\n", title, records.len()));
            for (idx, record) in records.iter().enumerate() {
                table.push_str(&format!("{:>5} {}\n", idx, record.describe(format)));
            }
        }
        table
    }
}

fn contents(records: &[LineRecord]) -> Vec<&str> {
    records.iter().map(|r| r.content.as_str()).collect()
}
