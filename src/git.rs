//! Git command runner for linetrace.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. The `git` diff backend goes through this module.

use crate::error::{Result, TraceError};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a git command whose exit code was accepted.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output, untrimmed (diff bodies are whitespace-sensitive).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
    /// Process exit code.
    pub exit_code: i32,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run a git command, accepting any of the given exit codes as success.
///
/// `git diff --no-index` exits with 1 when the inputs differ, so callers
/// list the codes that carry a usable result.
///
/// # Arguments
///
/// * `git_binary` - The git executable to run
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
/// * `accepted` - Exit codes treated as success
///
/// # Returns
///
/// * `Ok(GitOutput)` - On an accepted exit code
/// * `Err(TraceError::DiffError)` - Spawn failure or unexpected exit code
pub fn run_git_accepting<P: AsRef<Path>>(
    git_binary: &str,
    cwd: P,
    args: &[&str],
    accepted: &[i32],
) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new(git_binary)
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            TraceError::DiffError(format!(
                "failed to execute {} {}: {} (is git installed?)",
                git_binary,
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if accepted.contains(&git_output.exit_code) {
        Ok(git_output)
    } else {
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr.clone()
        };

        Err(TraceError::DiffError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            git_output.exit_code,
            error_msg
        )))
    }
}

/// Returns true if the git executable can be run.
pub fn git_available(git_binary: &str) -> bool {
    Command::new(git_binary)
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_git_version() {
        if !git_available("git") {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let output = run_git_accepting("git", temp_dir.path(), &["--version"], &[0]).unwrap();
        assert!(output.stdout.contains("git version"));
        assert_eq!(output.exit_code, 0);
    }

    #[test]
    fn test_unaccepted_exit_code_is_diff_error() {
        if !git_available("git") {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        // `--version` exits 0, which this caller does not accept
        let result = run_git_accepting("git", temp_dir.path(), &["--version"], &[1]);

        match result {
            Err(TraceError::DiffError(msg)) => {
                assert!(msg.contains("git --version failed (exit code 0)"))
            }
            other => panic!("expected DiffError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_binary_is_diff_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_git_accepting(
            "definitely-not-a-git-binary",
            temp_dir.path(),
            &["--version"],
            &[0],
        );

        assert!(matches!(result, Err(TraceError::DiffError(_))));
        assert!(!git_available("definitely-not-a-git-binary"));
    }
}
