//! Two-reference reconciliation of a new version against base and head.

use crate::diff::{DiffProvider, LineChanges, join_lines, line_changes};
use crate::error::{ConsistencyFault, Result};
use crate::timefmt::Timestamp;
use std::collections::HashSet;
use tracing::debug;

use super::record::{FileTrackState, LineRecord};

/// Reconcile `new_version` against the state's head and base.
///
/// Returns the next state; `state` itself is never modified, so a fault
/// leaves the caller holding the last consistent state.
///
/// Steps:
/// 1. Diff head against the new version (which lines changed since last capture).
/// 2. Check `head - deleted + added == new` line counts.
/// 3. Diff base against the new version.
/// 4. Base lines deleted relative to base die at `new_timestamp`.
/// 5. Dead base lines no longer deleted relative to base are reverts: they
///    come back alive with the base timestamp.
/// 6. Rebuild head; inserted lines that are also new relative to base get
///    `new_timestamp`, the rest are base content resurfacing and get the base
///    timestamp.
/// 7. Check the rebuilt head matches the new version line by line.
///
/// # Errors
///
/// * `TraceError::ConsistencyFault` - The diffs disagree with each other or
///   with the new version
/// * `TraceError::ParseFault` / `TraceError::DiffError` - From the provider
pub fn reconcile<S: AsRef<str>>(
    state: &FileTrackState,
    provider: &dyn DiffProvider,
    new_version: &[S],
    new_timestamp: Timestamp,
) -> Result<FileTrackState> {
    let new_text = join_lines(new_version);

    let head_changes = line_changes(provider, &state.head_text(), &new_text)?;

    let head_len = state.head_status.len();
    if head_len + head_changes.added.len() != new_version.len() + head_changes.deleted.len() {
        return Err(ConsistencyFault::CountMismatch {
            head: head_len,
            deleted: head_changes.deleted.len(),
            added: head_changes.added.len(),
            expected: new_version.len(),
        }
        .into());
    }

    let base_changes = line_changes(provider, &state.base_text(), &new_text)?;

    let base_status = update_base(state, &base_changes, new_timestamp)?;
    let head_status = rebuild_head(
        &state.head_status,
        &head_changes,
        &base_changes,
        state.base_timestamp,
        new_timestamp,
    );
    verify_head(&head_status, new_version)?;

    debug!(
        head_deleted = head_changes.deleted.len(),
        head_added = head_changes.added.len(),
        base_deleted = base_changes.deleted.len(),
        base_added = base_changes.added.len(),
        dead_base_lines = base_status.iter().filter(|r| !r.alive).count(),
        new_timestamp,
        "reconciled version"
    );

    Ok(FileTrackState {
        base_status,
        head_status,
        base_timestamp: state.base_timestamp,
    })
}

/// Steps 4 and 5: kill base lines the new version lacks, revive reverted ones.
fn update_base(
    state: &FileTrackState,
    base_changes: &LineChanges,
    new_timestamp: Timestamp,
) -> Result<Vec<LineRecord>> {
    let mut base = state.base_status.clone();
    let len = base.len();

    for (idx, _) in &base_changes.deleted {
        let record = base
            .get_mut(*idx)
            .ok_or(ConsistencyFault::BaseIndexOutOfRange { index: *idx, len })?;
        if record.alive {
            record.alive = false;
            record.last_modified_time = new_timestamp;
        }
    }

    for (idx, record) in base.iter_mut().enumerate() {
        if !record.alive && !base_changes.deletes(idx, &record.content) {
            record.alive = true;
            record.last_modified_time = state.base_timestamp;
        }
    }

    Ok(base)
}

/// Step 6: index-merge the surviving head records with the inserted lines.
///
/// Added indices are positions in the new version; every other position is
/// filled by the next surviving record, in order.
fn rebuild_head(
    old_head: &[LineRecord],
    head_changes: &LineChanges,
    base_changes: &LineChanges,
    base_timestamp: Timestamp,
    new_timestamp: Timestamp,
) -> Vec<LineRecord> {
    let deleted: HashSet<usize> = head_changes.deleted.iter().map(|(idx, _)| *idx).collect();
    let mut kept = old_head
        .iter()
        .enumerate()
        .filter(|(idx, _)| !deleted.contains(idx))
        .map(|(_, record)| record);
    let mut added = head_changes.added.iter().peekable();

    let total = old_head.len() - deleted.len().min(old_head.len()) + head_changes.added.len();
    let mut head = Vec::with_capacity(total);

    for idx in 0..total {
        match added.peek() {
            Some((added_idx, content)) if *added_idx == idx => {
                let timestamp = if base_changes.adds(idx, content) {
                    new_timestamp
                } else {
                    base_timestamp
                };
                head.push(LineRecord::new(content.clone(), timestamp));
                added.next();
            }
            _ => match kept.next() {
                Some(record) => head.push(record.clone()),
                None => break,
            },
        }
    }

    head
}

/// Step 7: the rebuilt head must match the new version line for line.
fn verify_head<S: AsRef<str>>(head: &[LineRecord], new_version: &[S]) -> Result<()> {
    if head.len() != new_version.len() {
        return Err(ConsistencyFault::HeadLengthMismatch {
            head: head.len(),
            expected: new_version.len(),
        }
        .into());
    }

    for (index, (record, line)) in head.iter().zip(new_version).enumerate() {
        if record.content.trim() != line.as_ref().trim() {
            return Err(ConsistencyFault::ContentMismatch {
                index,
                expected: line.as_ref().to_string(),
                actual: record.content.clone(),
            }
            .into());
        }
    }

    Ok(())
}
