//! Linetrace: revert-aware line provenance over whole-file snapshots.
//!
//! Given the successive captured versions of a set of files, linetrace
//! tracks for every line when it was last genuinely modified. A line that is
//! deleted and later restored with the same text gets its original time
//! back. The final base -> head diff of each file is emitted as windows
//! annotated with per-line timestamps.
//!
//! The pipeline is: [`diff`] partitions full-context diffs into windows,
//! [`provenance`] folds versions into a [`provenance::FileTrackState`],
//! [`snapshot`] annotates the final diff, and [`driver`] runs it over many
//! files.

pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod driver;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod provenance;
pub mod snapshot;
pub mod timefmt;
