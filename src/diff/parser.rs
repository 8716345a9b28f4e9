//! Core diff partitioning logic.

use crate::error::{Result, TraceError};

use super::helpers::{first_file_section, parse_hunk_header};
use super::types::{EditKind, EditWindow, LineRange, Partition, Window};

/// Partition a full-context unified diff into runs and edit windows.
///
/// Only the first file section is read. Everything before the hunk header
/// (`diff --git`, `index`, `---`/`+++` lines) is skipped. Every partitioned
/// line is normalized to end with `\n`.
///
/// # Arguments
///
/// * `diff` - Unified diff produced with unlimited context
///
/// # Returns
///
/// * `Ok(Partition)` - Ordered windows covering both texts
/// * `Err(TraceError::ParseFault)` - No hunk header, elided context, or a body
///   that disagrees with its header
pub fn partition_diff(diff: &str) -> Result<Partition> {
    let section = first_file_section(diff);
    let mut lines = section.lines();

    let header = loop {
        match lines.next() {
            Some(line) if line.starts_with("@@") => {
                break parse_hunk_header(line).ok_or_else(|| {
                    TraceError::ParseFault(format!("malformed hunk header: {}", line))
                })?;
            }
            Some(_) => continue,
            None => {
                return Err(TraceError::ParseFault(
                    "no hunk header (@@ -a,b +c,d @@) found in diff".to_string(),
                ));
            }
        }
    };

    if !header.is_full_context() {
        return Err(TraceError::ParseFault(format!(
            "hunk does not start at line 1 (-{} +{}); diff context was elided",
            header.old_start, header.new_start
        )));
    }

    let mut builder = WindowBuilder::default();
    for line in lines {
        if line.starts_with("@@") {
            return Err(TraceError::ParseFault(
                "diff has more than one hunk; diff context was elided".to_string(),
            ));
        }

        if let Some(content) = line.strip_prefix(' ') {
            builder.context(content);
        } else if let Some(content) = line.strip_prefix('-') {
            builder.delete(content);
        } else if let Some(content) = line.strip_prefix('+') {
            builder.insert(content);
        }
        // `\ No newline at end of file` markers carry no line
    }

    let (windows, parent_len, child_len) = builder.finish();

    if parent_len != header.old_len || child_len != header.new_len {
        return Err(TraceError::ParseFault(format!(
            "hunk header declares {} -> {} lines but body has {} -> {}",
            header.old_len, header.new_len, parent_len, child_len
        )));
    }

    Ok(Partition::new(windows))
}

/// Accumulates diff body lines into windows with running parent/child cursors.
#[derive(Default)]
struct WindowBuilder {
    windows: Vec<Window>,
    run: Vec<String>,
    edit: Option<(Vec<String>, Vec<String>)>,
    parent_cursor: usize,
    child_cursor: usize,
}

impl WindowBuilder {
    fn context(&mut self, content: &str) {
        self.close_edit();
        self.run.push(format!("{}\n", content));
    }

    fn delete(&mut self, content: &str) {
        self.flush_run();
        let (before, _) = self.edit.get_or_insert_with(Default::default);
        before.push(format!("{}\n", content));
    }

    fn insert(&mut self, content: &str) {
        self.flush_run();
        let (_, after) = self.edit.get_or_insert_with(Default::default);
        after.push(format!("{}\n", content));
    }

    fn flush_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.run);
        self.parent_cursor += run.len();
        self.child_cursor += run.len();
        self.windows.push(Window::Run(run));
    }

    fn close_edit(&mut self) {
        let Some((before, after)) = self.edit.take() else {
            return;
        };

        let parent_range = LineRange::new(self.parent_cursor, before.len());
        let child_range = LineRange::new(self.child_cursor, after.len());
        self.parent_cursor = parent_range.end;
        self.child_cursor = child_range.end;

        self.windows.push(Window::Edit(EditWindow {
            kind: EditKind::classify(&before, &after),
            before,
            after,
            parent_range,
            child_range,
        }));
    }

    /// Close whatever is pending and return `(windows, parent_len, child_len)`.
    fn finish(mut self) -> (Vec<Window>, usize, usize) {
        self.close_edit();
        self.flush_run();
        (self.windows, self.parent_cursor, self.child_cursor)
    }
}
