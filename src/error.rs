//! Error types for linetrace.
//!
//! Uses thiserror for derive macros. Parse and consistency faults are never
//! recovered from: they mean the provenance data for a file is untrustworthy.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for linetrace operations.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The diff backend returned content the partitioner cannot interpret.
    #[error("Diff parse fault: {0}")]
    ParseFault(String),

    /// A reconciliation step broke a provenance invariant.
    #[error("Consistency fault: {0}")]
    ConsistencyFault(#[from] ConsistencyFault),

    /// Degenerate input history (for example mismatched version/timestamp counts).
    #[error("Invalid input: {0}")]
    InputFault(String),

    /// The diff backend could not be run.
    #[error("Diff backend failed: {0}")]
    DiffError(String),

    /// User provided invalid arguments, config or files.
    #[error("{0}")]
    UserError(String),

    /// A fault raised while processing a specific file.
    #[error("{path}: {source}")]
    FileFault {
        path: String,
        #[source]
        source: Box<TraceError>,
    },
}

/// Invariant violations detected by reconciliation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyFault {
    /// `head - deleted + added` does not match the new version's line count.
    #[error("{head} - {deleted} + {added} != {expected} lines in new version")]
    CountMismatch {
        head: usize,
        deleted: usize,
        added: usize,
        expected: usize,
    },

    /// A rebuilt head line disagrees with the new version at `index`.
    #[error("head line {index} is {actual:?}, new version has {expected:?}")]
    ContentMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// The rebuilt head has a different length than the new version.
    #[error("rebuilt head has {head} lines, new version has {expected}")]
    HeadLengthMismatch { head: usize, expected: usize },

    /// A diff referenced a base line that does not exist.
    #[error("diff references base line {index} but base has {len} lines")]
    BaseIndexOutOfRange { index: usize, len: usize },

    /// A snapshot window range does not fit the status it annotates.
    #[error("{side} window range {start}..{end} overruns {len} tracked lines")]
    WindowOutOfRange {
        side: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },
}

impl TraceError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TraceError::ParseFault(_) => exit_codes::PARSE_FAILURE,
            TraceError::ConsistencyFault(_) => exit_codes::CONSISTENCY_FAILURE,
            TraceError::InputFault(_) => exit_codes::USER_ERROR,
            TraceError::DiffError(_) => exit_codes::DIFF_FAILURE,
            TraceError::UserError(_) => exit_codes::USER_ERROR,
            TraceError::FileFault { source, .. } => source.exit_code(),
        }
    }

    /// Attach the path of the file being processed.
    pub fn in_file(self, path: &str) -> Self {
        match self {
            already @ TraceError::FileFault { .. } => already,
            other => TraceError::FileFault {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Result type alias for linetrace operations.
pub type Result<T> = std::result::Result<T, TraceError>;
