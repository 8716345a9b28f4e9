//! Exit code constants for the linetrace CLI.
//!
//! - 0: Success
//! - 1: User or input error (bad args, unreadable files, degenerate history)
//! - 3: Diff parse fault
//! - 4: Provenance consistency fault
//! - 5: Diff backend failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, invalid config or history.
pub const USER_ERROR: i32 = 1;

/// The diff backend produced output the partitioner cannot interpret.
pub const PARSE_FAILURE: i32 = 3;

/// A reconciliation step broke the line-count or content invariant.
pub const CONSISTENCY_FAILURE: i32 = 4;

/// The diff backend could not be run.
pub const DIFF_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            PARSE_FAILURE,
            CONSISTENCY_FAILURE,
            DIFF_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
