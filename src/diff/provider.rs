//! Diff backends producing full-context unified diffs.

use crate::config::{Config, DiffBackend};
use crate::error::{Result, TraceError};
use crate::git::{GitOutput, run_git_accepting};
use imara_diff::{Algorithm, Diff, InternedInput};
use std::fmt::Write as _;
use tracing::trace;

use super::helpers::strip_terminator;

/// Produces a unified diff with unlimited context between two texts.
///
/// Every unchanged line must be kept as context. Identical inputs yield
/// `Ok(None)`. Implementations are deterministic and total over any two
/// texts, including empty ones.
pub trait DiffProvider: Send + Sync {
    fn diff(&self, parent: &str, child: &str) -> Result<Option<String>>;
}

/// Pick the backend named by the config.
pub fn provider_for(config: &Config) -> Box<dyn DiffProvider> {
    match config.diff_backend {
        DiffBackend::Imara => Box::new(ImaraDiffProvider),
        DiffBackend::Git => Box::new(GitDiffProvider::new(&config.git_binary)),
    }
}

// ============================================================================
// In-process backend
// ============================================================================

/// In-process Myers diff with git-style line post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImaraDiffProvider;

impl DiffProvider for ImaraDiffProvider {
    fn diff(&self, parent: &str, child: &str) -> Result<Option<String>> {
        if parent == child {
            return Ok(None);
        }

        let old_lines = split_lines_with_terminators(parent);
        let new_lines = split_lines_with_terminators(child);

        // The `&str` token source splits on lines with terminators kept, so
        // token indices line up with `old_lines`/`new_lines`.
        let input = InternedInput::new(parent, child);
        let mut diff = Diff::compute(Algorithm::Myers, &input);
        diff.postprocess_lines(&input);

        let mut out = String::from("diff --git a/parent b/child\n--- a/parent\n+++ b/child\n");
        out.push_str(&hunk_header(old_lines.len(), new_lines.len()));

        let mut old_idx = 0;
        for hunk in diff.hunks() {
            let before = hunk.before.start as usize..hunk.before.end as usize;
            let after = hunk.after.start as usize..hunk.after.end as usize;

            for line in &old_lines[old_idx..before.start] {
                push_line(&mut out, ' ', line);
            }
            for line in &old_lines[before.clone()] {
                push_line(&mut out, '-', line);
            }
            for line in &new_lines[after] {
                push_line(&mut out, '+', line);
            }
            old_idx = before.end;
        }
        for line in &old_lines[old_idx..] {
            push_line(&mut out, ' ', line);
        }

        trace!(
            parent_lines = old_lines.len(),
            child_lines = new_lines.len(),
            "imara diff rendered"
        );
        Ok(Some(out))
    }
}

/// Single full-context hunk header, git style (`,1` lengths omitted).
fn hunk_header(old_len: usize, new_len: usize) -> String {
    fn side(len: usize) -> String {
        match len {
            0 => "0,0".to_string(),
            1 => "1".to_string(),
            n => format!("1,{}", n),
        }
    }
    format!("@@ -{} +{} @@\n", side(old_len), side(new_len))
}

fn push_line(out: &mut String, prefix: char, line: &str) {
    let _ = writeln!(out, "{}{}", prefix, strip_terminator(line));
    if !line.ends_with('\n') {
        out.push_str("\\ No newline at end of file\n");
    }
}

/// Splits a string into lines, preserving line terminators.
fn split_lines_with_terminators(s: &str) -> Vec<&str> {
    s.split_inclusive('\n').collect()
}

// ============================================================================
// git subprocess backend
// ============================================================================

/// Runs `git diff --no-index` on scratch copies of both texts.
#[derive(Debug, Clone)]
pub struct GitDiffProvider {
    git_binary: String,
}

impl GitDiffProvider {
    pub fn new(git_binary: &str) -> Self {
        Self {
            git_binary: git_binary.to_string(),
        }
    }
}

impl Default for GitDiffProvider {
    fn default() -> Self {
        Self::new("git")
    }
}

impl DiffProvider for GitDiffProvider {
    fn diff(&self, parent: &str, child: &str) -> Result<Option<String>> {
        if parent == child {
            return Ok(None);
        }

        let scratch = tempfile::TempDir::new()
            .map_err(|e| TraceError::DiffError(format!("failed to create scratch dir: {}", e)))?;
        for (name, text) in [("parent", parent), ("child", child)] {
            std::fs::write(scratch.path().join(name), text).map_err(|e| {
                TraceError::DiffError(format!("failed to write scratch file '{}': {}", name, e))
            })?;
        }

        // Context larger than either text keeps the whole file in one hunk.
        let context = parent.lines().count().max(child.lines().count()) + 1;
        let context_arg = format!("-U{}", context);

        let output = run_git_accepting(
            &self.git_binary,
            scratch.path(),
            &[
                "diff",
                "--no-index",
                "--no-color",
                "--no-ext-diff",
                &context_arg,
                "parent",
                "child",
            ],
            &[0, 1],
        )?;

        interpret_git_diff(output)
    }
}

/// Map a `git diff --no-index` result onto the provider contract.
///
/// Exit 0 means identical inputs. Exit 1 means "differs" but git also uses it
/// for its own failures, so it only counts when a diff body came back.
pub(super) fn interpret_git_diff(output: GitOutput) -> Result<Option<String>> {
    match output.exit_code {
        0 if output.is_empty() => Ok(None),
        1 if output.stdout.contains("\n@@ ") || output.stdout.starts_with("@@ ") => {
            Ok(Some(output.stdout))
        }
        code => {
            let detail = if output.stderr.is_empty() {
                "no diff output".to_string()
            } else {
                output.stderr
            };
            Err(TraceError::DiffError(format!(
                "git diff --no-index exited with {} without a usable diff: {}",
                code, detail
            )))
        }
    }
}
