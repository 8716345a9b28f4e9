//! Snapshot output types.

use crate::diff::EditWindow;
use crate::timefmt::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An edit window annotated with per-line provenance.
///
/// `base_timestamps` has one entry per `before` line (sliced from the base
/// status by `parent_range`), `head_timestamps` one per `after` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEdit {
    #[serde(flatten)]
    pub window: EditWindow,
    pub base_timestamps: Vec<Timestamp>,
    pub head_timestamps: Vec<Timestamp>,
    pub base_datetimes: Vec<String>,
    pub head_datetimes: Vec<String>,
    /// Global edit number across all files.
    pub idx: usize,
    pub file_path: String,
}

/// One unit of an assembled file snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotWindow {
    Run(Vec<String>),
    Edit(AnnotatedEdit),
}

impl SnapshotWindow {
    pub fn as_edit(&self) -> Option<&AnnotatedEdit> {
        match self {
            SnapshotWindow::Edit(edit) => Some(edit),
            SnapshotWindow::Run(_) => None,
        }
    }
}

/// Annotated windows for every successfully processed file.
///
/// Serializes as `{ file_path: [window, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    files: BTreeMap<String, Vec<SnapshotWindow>>,
    #[serde(skip)]
    failed_files: BTreeMap<String, String>,
}

impl Snapshot {
    pub(crate) fn insert_file(&mut self, path: &str, windows: Vec<SnapshotWindow>) {
        self.files.insert(path.to_string(), windows);
    }

    pub(crate) fn record_failure(&mut self, path: &str, reason: String) {
        self.failed_files.insert(path.to_string(), reason);
    }

    pub fn files(&self) -> &BTreeMap<String, Vec<SnapshotWindow>> {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&[SnapshotWindow]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Files dropped under the `skip` error policy, with the reason.
    pub fn failed_files(&self) -> &BTreeMap<String, String> {
        &self.failed_files
    }

    /// All annotated edits in `idx` order.
    pub fn edits(&self) -> Vec<&AnnotatedEdit> {
        let mut edits: Vec<&AnnotatedEdit> = self
            .files
            .values()
            .flatten()
            .filter_map(SnapshotWindow::as_edit)
            .collect();
        edits.sort_by_key(|edit| edit.idx);
        edits
    }

    /// Reassemble a file's final base text from runs and `before` lines.
    pub fn base_text(&self, path: &str) -> Option<String> {
        self.files.get(path).map(|windows| {
            windows
                .iter()
                .flat_map(|w| match w {
                    SnapshotWindow::Run(lines) => lines.iter(),
                    SnapshotWindow::Edit(edit) => edit.window.before.iter(),
                })
                .map(String::as_str)
                .collect()
        })
    }

    /// Reassemble a file's final head text from runs and `after` lines.
    pub fn head_text(&self, path: &str) -> Option<String> {
        self.files.get(path).map(|windows| {
            windows
                .iter()
                .flat_map(|w| match w {
                    SnapshotWindow::Run(lines) => lines.iter(),
                    SnapshotWindow::Edit(edit) => edit.window.after.iter(),
                })
                .map(String::as_str)
                .collect()
        })
    }
}
