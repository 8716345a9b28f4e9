//! Window types produced by the partitioner.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open line range `[start, end)` in one side of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The range as a slice index.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Kind of an edit window, derived from which sides carry lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

impl EditKind {
    /// Classify a window: no `before` lines is an insert, no `after` lines a delete.
    pub fn classify(before: &[String], after: &[String]) -> Self {
        if before.is_empty() {
            EditKind::Insert
        } else if after.is_empty() {
            EditKind::Delete
        } else {
            EditKind::Replace
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditKind::Insert => write!(f, "insert"),
            EditKind::Delete => write!(f, "delete"),
            EditKind::Replace => write!(f, "replace"),
        }
    }
}

/// One contiguous edit: lines removed from the parent and lines added in the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditWindow {
    #[serde(rename = "type")]
    pub kind: EditKind,
    pub before: Vec<String>,
    pub after: Vec<String>,
    #[serde(rename = "parent_version_range")]
    pub parent_range: LineRange,
    #[serde(rename = "child_version_range")]
    pub child_range: LineRange,
}

/// One unit of a partitioned diff.
///
/// Serializes untagged: a run is a JSON array of lines, an edit is an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Window {
    Run(Vec<String>),
    Edit(EditWindow),
}

impl Window {
    pub fn as_edit(&self) -> Option<&EditWindow> {
        match self {
            Window::Edit(edit) => Some(edit),
            Window::Run(_) => None,
        }
    }
}

/// Ordered window sequence covering both texts of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    windows: Vec<Window>,
}

impl Partition {
    pub(crate) fn new(windows: Vec<Window>) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn into_windows(self) -> Vec<Window> {
        self.windows
    }

    /// Only the edit windows, in order.
    pub fn edits(&self) -> Vec<&EditWindow> {
        self.windows.iter().filter_map(Window::as_edit).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Reassemble the parent text from runs and `before` lines.
    pub fn parent_text(&self) -> String {
        self.windows
            .iter()
            .flat_map(|w| match w {
                Window::Run(lines) => lines.iter(),
                Window::Edit(edit) => edit.before.iter(),
            })
            .map(String::as_str)
            .collect()
    }

    /// Reassemble the child text from runs and `after` lines.
    pub fn child_text(&self) -> String {
        self.windows
            .iter()
            .flat_map(|w| match w {
                Window::Run(lines) => lines.iter(),
                Window::Edit(edit) => edit.after.iter(),
            })
            .map(String::as_str)
            .collect()
    }
}
