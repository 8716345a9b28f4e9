//! Tests for diff partitioning and providers.

use super::helpers::{first_file_section, parse_hunk_header};
use super::provider::interpret_git_diff;
use super::*;
use crate::error::TraceError;
use crate::git::{GitOutput, git_available};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn edit(window: &Window) -> &EditWindow {
    window.as_edit().expect("expected an edit window")
}

/// Test partitioning a diff with two separate replace windows.
#[test]
fn test_partition_replace_windows() {
    let diff = r#"diff --git a/parent b/child
--- a/parent
+++ b/child
@@ -1,4 +1,4 @@
 a
-b
+B
 c
-d
+e
"#;

    let partition = partition_diff(diff).unwrap();
    let windows = partition.windows();

    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0], Window::Run(lines(&["a\n"])));

    let first = edit(&windows[1]);
    assert_eq!(first.kind, EditKind::Replace);
    assert_eq!(first.before, lines(&["b\n"]));
    assert_eq!(first.after, lines(&["B\n"]));
    assert_eq!(first.parent_range, LineRange { start: 1, end: 2 });
    assert_eq!(first.child_range, LineRange { start: 1, end: 2 });

    assert_eq!(windows[2], Window::Run(lines(&["c\n"])));

    let second = edit(&windows[3]);
    assert_eq!(second.parent_range, LineRange { start: 3, end: 4 });
    assert_eq!(second.child_range, LineRange { start: 3, end: 4 });

    assert_eq!(partition.edits().len(), 2);
}

/// Interleaved deletions and insertions belong to one window.
#[test]
fn test_interleaved_lines_extend_same_window() {
    let diff = "@@ -1,3 +1,3 @@\n-x\n+X\n-y\n+Y\n z\n";

    let partition = partition_diff(diff).unwrap();
    let windows = partition.windows();

    assert_eq!(windows.len(), 2);
    let window = edit(&windows[0]);
    assert_eq!(window.kind, EditKind::Replace);
    assert_eq!(window.before, lines(&["x\n", "y\n"]));
    assert_eq!(window.after, lines(&["X\n", "Y\n"]));
    assert_eq!(window.parent_range, LineRange { start: 0, end: 2 });
    assert_eq!(window.child_range, LineRange { start: 0, end: 2 });
}

/// A window that only deletes is a delete, even at end of input.
#[test]
fn test_trailing_delete_window() {
    let diff = "@@ -1,3 +1 @@\n a\n-b\n-c\n";

    let partition = partition_diff(diff).unwrap();
    let windows = partition.windows();

    assert_eq!(windows.len(), 2);
    let window = edit(&windows[1]);
    assert_eq!(window.kind, EditKind::Delete);
    assert!(window.after.is_empty());
    assert_eq!(window.parent_range, LineRange { start: 1, end: 3 });
    assert_eq!(window.child_range, LineRange { start: 1, end: 1 });
    assert!(window.child_range.is_empty());
}

/// An insert before the first line has an empty parent range at 0.
#[test]
fn test_leading_insert_window() {
    let diff = "@@ -1 +1,2 @@\n+new\n a\n";

    let partition = partition_diff(diff).unwrap();
    let windows = partition.windows();

    let window = edit(&windows[0]);
    assert_eq!(window.kind, EditKind::Insert);
    assert_eq!(window.parent_range, LineRange { start: 0, end: 0 });
    assert_eq!(window.child_range, LineRange { start: 0, end: 1 });
    assert_eq!(windows[1], Window::Run(lines(&["a\n"])));
}

/// Diffing from an empty parent is one insert window.
#[test]
fn test_empty_parent() {
    let diff = "--- /dev/null\n+++ b/child\n@@ -0,0 +1,2 @@\n+a\n+b\n";

    let partition = partition_diff(diff).unwrap();

    assert_eq!(partition.windows().len(), 1);
    let window = edit(&partition.windows()[0]);
    assert_eq!(window.kind, EditKind::Insert);
    assert_eq!(window.child_range, LineRange { start: 0, end: 2 });
}

/// "No newline" markers are not lines.
#[test]
fn test_no_newline_marker_is_ignored() {
    let diff = "@@ -1,2 +1,2 @@\n a\n-b\n\\ No newline at end of file\n+c\n\\ No newline at end of file\n";

    let partition = partition_diff(diff).unwrap();

    assert_eq!(partition.parent_text(), "a\nb\n");
    assert_eq!(partition.child_text(), "a\nc\n");
}

#[test]
fn test_missing_hunk_header_is_parse_fault() {
    let diff = "diff --git a/parent b/child\n--- a/parent\n+++ b/child\n a\n-b\n";

    let result = partition_diff(diff);

    assert!(matches!(result, Err(TraceError::ParseFault(_))));
}

#[test]
fn test_empty_diff_is_parse_fault() {
    assert!(matches!(partition_diff(""), Err(TraceError::ParseFault(_))));
}

#[test]
fn test_elided_leading_context_is_parse_fault() {
    let diff = "@@ -5,2 +5,2 @@\n x\n-y\n+z\n";

    let err = partition_diff(diff).unwrap_err();

    assert!(err.to_string().contains("elided"));
}

#[test]
fn test_second_hunk_is_parse_fault() {
    let diff = "@@ -1,2 +1,2 @@\n a\n-b\n+c\n@@ -10,1 +10,1 @@\n-x\n+y\n";

    let err = partition_diff(diff).unwrap_err();

    assert!(matches!(err, TraceError::ParseFault(_)));
    assert!(err.to_string().contains("more than one hunk"));
}

#[test]
fn test_truncated_body_is_parse_fault() {
    let diff = "@@ -1,3 +1,3 @@\n a\n-b\n+c\n";

    let err = partition_diff(diff).unwrap_err();

    assert!(err.to_string().contains("declares 3 -> 3 lines but body has 2 -> 2"));
}

#[test]
fn test_only_first_file_section_is_read() {
    let diff = "diff --git a/one b/one\n@@ -1 +1 @@\n-a\n+b\ndiff --git a/two b/two\n@@ -1 +1 @@\n-c\n+d\n";

    assert_eq!(
        first_file_section(diff),
        "diff --git a/one b/one\n@@ -1 +1 @@\n-a\n+b\n"
    );
    let partition = partition_diff(diff).unwrap();
    assert_eq!(partition.edits().len(), 1);
}

#[test]
fn test_parse_hunk_header_forms() {
    let header = parse_hunk_header("@@ -1,4 +1,5 @@ fn main() {").unwrap();
    assert_eq!((header.old_start, header.old_len), (1, 4));
    assert_eq!((header.new_start, header.new_len), (1, 5));

    let header = parse_hunk_header("@@ -1 +1 @@").unwrap();
    assert_eq!((header.old_len, header.new_len), (1, 1));

    let header = parse_hunk_header("@@ -0,0 +1,3 @@").unwrap();
    assert!(header.is_full_context());

    assert!(parse_hunk_header("@@ garbage @@").is_none());
    assert!(parse_hunk_header(" a").is_none());
}

// ============================================================================
// Providers
// ============================================================================

#[test]
fn test_imara_identical_texts_have_no_diff() {
    let provider = ImaraDiffProvider;
    assert_eq!(provider.diff("a\nb\n", "a\nb\n").unwrap(), None);
    assert_eq!(provider.diff("", "").unwrap(), None);
}

#[test]
fn test_imara_deleted_line() {
    let provider = ImaraDiffProvider;
    let partition = diff_texts(&provider, "a\nb\nc\n", "a\nc\n").unwrap();
    let windows = partition.windows();

    assert_eq!(windows.len(), 3);
    let window = edit(&windows[1]);
    assert_eq!(window.kind, EditKind::Delete);
    assert_eq!(window.before, lines(&["b\n"]));
    assert_eq!(window.parent_range, LineRange { start: 1, end: 2 });
    assert_eq!(window.child_range, LineRange { start: 1, end: 1 });
}

#[test]
fn test_imara_handles_missing_final_newline() {
    let provider = ImaraDiffProvider;
    let diff = provider.diff("a\nb", "a\nc").unwrap().unwrap();

    assert!(diff.contains("\\ No newline at end of file"));
    let partition = partition_diff(&diff).unwrap();
    assert_eq!(partition.edits().len(), 1);
    assert_eq!(partition.child_text(), "a\nc\n");
}

#[test]
fn test_imara_empty_sides() {
    let provider = ImaraDiffProvider;

    let partition = diff_texts(&provider, "", "x\ny\n").unwrap();
    assert_eq!(partition.edits().len(), 1);
    assert_eq!(partition.edits()[0].kind, EditKind::Insert);

    let partition = diff_texts(&provider, "x\ny\n", "").unwrap();
    assert_eq!(partition.edits()[0].kind, EditKind::Delete);
    assert_eq!(partition.child_text(), "");
}

/// Runs and edits reassemble both texts, with contiguous ranges.
#[test]
fn test_partition_reconstructs_both_texts() {
    let provider = ImaraDiffProvider;
    let pairs = [
        ("a\nb\nc\n", "a\nc\n"),
        ("a\nb\nc\n", "x\na\nb\nc\ny\n"),
        ("fn main() {\n    old();\n}\n", "fn main() {\n    new();\n    more();\n}\n"),
        ("1\n2\n3\n4\n5\n6\n", "6\n5\n4\n3\n2\n1\n"),
        ("same\n\n\nblank\n", "same\n\nblank\n\n"),
    ];

    for (parent, child) in pairs {
        let partition = diff_texts(&provider, parent, child).unwrap();
        assert_eq!(partition.parent_text(), parent, "parent of {:?}", (parent, child));
        assert_eq!(partition.child_text(), child, "child of {:?}", (parent, child));

        let (mut p, mut c) = (0, 0);
        for window in partition.windows() {
            match window {
                Window::Run(run) => {
                    p += run.len();
                    c += run.len();
                }
                Window::Edit(edit) => {
                    assert_eq!(edit.parent_range.start, p);
                    assert_eq!(edit.child_range.start, c);
                    assert_eq!(edit.kind, EditKind::classify(&edit.before, &edit.after));
                    p = edit.parent_range.end;
                    c = edit.child_range.end;
                }
            }
        }
    }
}

#[test]
fn test_line_changes_positions() {
    let provider = ImaraDiffProvider;
    let changes = line_changes(&provider, "a\nb\nc\n", "a\nc\nd\n").unwrap();

    assert_eq!(changes.deleted, vec![(1, "b\n".to_string())]);
    assert_eq!(changes.added, vec![(2, "d\n".to_string())]);
    assert!(changes.deletes(1, "b"));
    assert!(!changes.deletes(1, "c"));
    assert!(!changes.deletes(0, "a"));
    assert!(changes.adds(2, "d\n"));
}

#[test]
fn test_line_changes_identical_is_empty() {
    let changes = line_changes(&ImaraDiffProvider, "a\n", "a\n").unwrap();
    assert!(changes.is_empty());
}

#[test]
fn test_git_provider_matches_imara() {
    if !git_available("git") {
        return;
    }
    let git = GitDiffProvider::default();
    let imara = ImaraDiffProvider;

    let parent = "a\nb\nc\n";
    let child = "a\nx\nc\nd\n";

    let from_git = diff_texts(&git, parent, child).unwrap();
    let from_imara = diff_texts(&imara, parent, child).unwrap();

    assert_eq!(from_git, from_imara);
    assert_eq!(git.diff(parent, parent).unwrap(), None);
}

fn git_output(exit_code: i32, stdout: &str, stderr: &str) -> GitOutput {
    GitOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
    }
}

#[test]
fn test_git_exit_one_without_body_is_diff_error() {
    let result = interpret_git_diff(git_output(1, "", "error: Could not access 'parent'"));

    match result {
        Err(TraceError::DiffError(msg)) => assert!(msg.contains("Could not access")),
        other => panic!("expected DiffError, got {:?}", other),
    }
}

#[test]
fn test_git_exit_codes_map_to_contract() {
    let body = "diff --git a/parent b/child\n--- a/parent\n+++ b/child\n@@ -1 +1 @@\n-a\n+b\n";

    assert_eq!(interpret_git_diff(git_output(0, "", "")).unwrap(), None);
    assert_eq!(
        interpret_git_diff(git_output(1, body, "")).unwrap(),
        Some(body.to_string())
    );
    assert!(matches!(
        interpret_git_diff(git_output(128, "", "fatal: bad")),
        Err(TraceError::DiffError(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_failing_git_binary_is_not_identical_texts() {
    // `false` exits 1 with no output, like a failed `git diff --no-index`
    let provider = GitDiffProvider::new("false");

    assert!(matches!(
        provider.diff("a\n", "b\n"),
        Err(TraceError::DiffError(_))
    ));
    assert!(matches!(
        diff_texts(&provider, "a\n", "b\n"),
        Err(TraceError::DiffError(_))
    ));
}

#[test]
fn test_join_lines_normalizes_terminators() {
    assert_eq!(join_lines(&["a", "b\n", "c\r\n"]), "a\nb\nc\n");
    assert_eq!(join_lines::<&str>(&[]), "");
}

#[test]
fn test_same_line_ignores_terminators() {
    assert!(same_line("a\n", "a"));
    assert!(same_line("a\r\n", "a\n"));
    assert!(!same_line(" a", "a"));
}

#[test]
fn test_window_json_shape() {
    let partition = diff_texts(&ImaraDiffProvider, "a\nb\n", "a\nc\n").unwrap();
    let json = serde_json::to_value(partition.windows()).unwrap();

    assert_eq!(json[0], serde_json::json!(["a\n"]));
    assert_eq!(json[1]["type"], "replace");
    assert_eq!(json[1]["parent_version_range"]["start"], 1);
    assert_eq!(json[1]["child_version_range"]["end"], 2);
}
