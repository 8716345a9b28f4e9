//! Line diff primitives for linetrace.
//!
//! This module turns a full-context unified diff between two whole texts
//! into an ordered sequence of windows:
//! - unchanged runs of lines
//! - edit windows tagged insert/delete/replace, with their line ranges in
//!   the parent (left) and child (right) text
//!
//! Diffs come from a [`DiffProvider`], either the in-process Myers backend
//! or `git diff --no-index`. Providers must keep every unchanged line as
//! context so the partition covers every line of both texts.

mod api;
mod helpers;
mod parser;
mod provider;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use api::{LineChanges, diff_texts, join_lines, line_changes, same_line};
pub use parser::partition_diff;
pub use provider::{DiffProvider, GitDiffProvider, ImaraDiffProvider, provider_for};
pub use types::{EditKind, EditWindow, LineRange, Partition, Window};
