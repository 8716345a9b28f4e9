//! Window annotation and global edit numbering.

use crate::diff::{DiffProvider, EditWindow, Window, diff_texts};
use crate::error::{ConsistencyFault, Result, TraceError};
use crate::provenance::{FileTrackState, LineRecord};
use crate::timefmt::TimeFormat;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::debug;

use super::types::{AnnotatedEdit, Snapshot, SnapshotWindow};

/// Assemble the snapshot for every file, failing on the first faulty file.
///
/// Edits are numbered in file order (lexicographic path), then window order
/// within a file.
pub fn assemble(
    states: &BTreeMap<String, FileTrackState>,
    provider: &dyn DiffProvider,
    format: &TimeFormat,
) -> Result<Snapshot> {
    assemble_with(states, provider, format, |path, err| Err(err.in_file(path)))
}

/// Assemble the snapshot, handing each faulty file to `on_failure`.
///
/// `on_failure` either returns an error, which aborts assembly, or `Ok(())`,
/// which leaves the file out. A file left out consumes no `idx`.
pub fn assemble_with<F>(
    states: &BTreeMap<String, FileTrackState>,
    provider: &dyn DiffProvider,
    format: &TimeFormat,
    mut on_failure: F,
) -> Result<Snapshot>
where
    F: FnMut(&str, TraceError) -> Result<()>,
{
    let mut snapshot = Snapshot::default();
    let mut next_idx = 0;

    for (path, state) in states {
        match assemble_file(path, state, provider, format, &mut next_idx) {
            Ok(windows) => snapshot.insert_file(path, windows),
            Err(err) => on_failure(path, err)?,
        }
    }

    Ok(snapshot)
}

/// Annotate one file's final base -> head diff.
///
/// `next_idx` is only advanced when the file assembles successfully. A file
/// whose head equals its base is a single unchanged run.
pub fn assemble_file(
    path: &str,
    state: &FileTrackState,
    provider: &dyn DiffProvider,
    format: &TimeFormat,
    next_idx: &mut usize,
) -> Result<Vec<SnapshotWindow>> {
    let base_text = state.base_text();
    let partition = diff_texts(provider, &base_text, &state.head_text())?;

    if partition.is_empty() {
        if base_text.is_empty() {
            return Ok(Vec::new());
        }
        let run = base_text.split_inclusive('\n').map(str::to_string).collect();
        return Ok(vec![SnapshotWindow::Run(run)]);
    }

    let mut idx = *next_idx;
    let mut windows = Vec::with_capacity(partition.windows().len());
    for window in partition.into_windows() {
        match window {
            Window::Run(lines) => windows.push(SnapshotWindow::Run(lines)),
            Window::Edit(edit) => {
                windows.push(SnapshotWindow::Edit(annotate(edit, state, format, idx, path)?));
                idx += 1;
            }
        }
    }

    debug!(file = path, edits = idx - *next_idx, "assembled file snapshot");
    *next_idx = idx;
    Ok(windows)
}

fn annotate(
    window: EditWindow,
    state: &FileTrackState,
    format: &TimeFormat,
    idx: usize,
    path: &str,
) -> Result<AnnotatedEdit> {
    let base = slice("base", state.base_status(), window.parent_range.as_range())?;
    let head = slice("head", state.head_status(), window.child_range.as_range())?;

    let base_timestamps: Vec<_> = base.iter().map(|r| r.last_modified_time).collect();
    let head_timestamps: Vec<_> = head.iter().map(|r| r.last_modified_time).collect();

    Ok(AnnotatedEdit {
        base_datetimes: base_timestamps.iter().map(|&t| format.render(t)).collect(),
        head_datetimes: head_timestamps.iter().map(|&t| format.render(t)).collect(),
        base_timestamps,
        head_timestamps,
        window,
        idx,
        file_path: path.to_string(),
    })
}

/// Records covered by `range`; a range past the end is a broken invariant.
pub(super) fn slice<'a>(
    side: &'static str,
    records: &'a [LineRecord],
    range: Range<usize>,
) -> Result<&'a [LineRecord]> {
    records.get(range.clone()).ok_or_else(|| {
        ConsistencyFault::WindowOutOfRange {
            side,
            start: range.start,
            end: range.end,
            len: records.len(),
        }
        .into()
    })
}
