//! Helper functions for diff parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `@@ -old_start[,old_len] +new_start[,new_len] @@[ context]`.
static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex is valid")
});

/// Parsed hunk header ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct HunkHeader {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

impl HunkHeader {
    /// A full-context hunk starts at line 1 of each non-empty side.
    pub fn is_full_context(&self) -> bool {
        let side_ok = |start: usize, len: usize| if len == 0 { start <= 1 } else { start == 1 };
        side_ok(self.old_start, self.old_len) && side_ok(self.new_start, self.new_len)
    }
}

/// Parse a hunk header line.
///
/// Omitted lengths default to 1, as in git's output for single-line sides.
/// Returns None if the line is not a hunk header.
pub(super) fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = HUNK_HEADER.captures(line)?;
    let number = |i: usize, default: usize| {
        caps.get(i)
            .map_or(Some(default), |m| m.as_str().parse().ok())
    };

    Some(HunkHeader {
        old_start: number(1, 0)?,
        old_len: number(2, 1)?,
        new_start: number(3, 0)?,
        new_len: number(4, 1)?,
    })
}

/// Returns the first file section of a multi-file diff.
///
/// Everything from the second `diff --git` header onward is dropped; a diff
/// without any `diff --git` header is returned unchanged.
pub(super) fn first_file_section(diff: &str) -> &str {
    let mut seen_header = false;
    let mut offset = 0;

    for line in diff.split_inclusive('\n') {
        if line.starts_with("diff --git ") {
            if seen_header {
                return &diff[..offset];
            }
            seen_header = true;
        }
        offset += line.len();
    }

    diff
}

/// Strip a trailing `\n` or `\r\n` from a line.
pub(super) fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
