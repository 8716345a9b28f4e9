//! Public API for line diffs between whole texts.

use crate::error::Result;

use super::helpers::strip_terminator;
use super::parser::partition_diff;
use super::provider::DiffProvider;
use super::types::{Partition, Window};

/// Lines removed from the parent and added in the child, keyed by position.
///
/// Both lists are sorted by index. Deleted indices are parent positions,
/// added indices are child positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineChanges {
    pub deleted: Vec<(usize, String)>,
    pub added: Vec<(usize, String)>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.added.is_empty()
    }

    /// True if the parent line `index` with this content was deleted.
    pub fn deletes(&self, index: usize, content: &str) -> bool {
        lookup(&self.deleted, index).is_some_and(|line| same_line(line, content))
    }

    /// True if the child line `index` with this content was added.
    pub fn adds(&self, index: usize, content: &str) -> bool {
        lookup(&self.added, index).is_some_and(|line| same_line(line, content))
    }
}

fn lookup(entries: &[(usize, String)], index: usize) -> Option<&str> {
    entries
        .binary_search_by_key(&index, |(idx, _)| *idx)
        .ok()
        .map(|pos| entries[pos].1.as_str())
}

/// Compare two lines ignoring their terminators.
pub fn same_line(a: &str, b: &str) -> bool {
    strip_terminator(a) == strip_terminator(b)
}

/// Join lines into a text where every line ends with exactly one `\n`.
///
/// Lines may arrive with or without their terminator; the joined text always
/// has one line per entry.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        text.push_str(strip_terminator(line.as_ref()));
        text.push('\n');
    }
    text
}

/// Diff two texts and partition the result.
///
/// Identical texts produce an empty partition.
pub fn diff_texts(provider: &dyn DiffProvider, parent: &str, child: &str) -> Result<Partition> {
    if parent == child {
        return Ok(Partition::default());
    }

    match provider.diff(parent, child)? {
        Some(diff) => partition_diff(&diff),
        None => Ok(Partition::default()),
    }
}

/// Positional line changes between two texts.
///
/// Walks the partition with running parent/child cursors, collecting every
/// `before` line as deleted and every `after` line as added.
pub fn line_changes(
    provider: &dyn DiffProvider,
    parent: &str,
    child: &str,
) -> Result<LineChanges> {
    let partition = diff_texts(provider, parent, child)?;

    let mut changes = LineChanges::default();
    let mut parent_idx = 0;
    let mut child_idx = 0;

    for window in partition.windows() {
        match window {
            Window::Run(lines) => {
                parent_idx += lines.len();
                child_idx += lines.len();
            }
            Window::Edit(edit) => {
                for (offset, line) in edit.before.iter().enumerate() {
                    changes.deleted.push((parent_idx + offset, line.clone()));
                }
                for (offset, line) in edit.after.iter().enumerate() {
                    changes.added.push((child_idx + offset, line.clone()));
                }
                parent_idx += edit.before.len();
                child_idx += edit.after.len();
            }
        }
    }

    Ok(changes)
}
