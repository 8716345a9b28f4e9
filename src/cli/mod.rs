//! CLI argument parsing for linetrace.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Linetrace: revert-aware line provenance over whole-file snapshots.
///
/// Reads the captured versions of each file, tracks when every line was
/// last really modified (a reverted edit restores the original time), and
/// emits the final base -> head diff annotated with those times.
#[derive(Parser, Debug)]
#[command(name = "linetrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for linetrace.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Track every file in a history document and emit the annotated snapshot.
    Process(ProcessArgs),

    /// Print the window partition between two files.
    Partition(PartitionArgs),

    /// Fold one file's history and print its base/head status tables.
    Status(StatusArgs),
}

/// Options shared by every command that diffs.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a `linetrace.yaml` config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Diff backend: `imara` (in-process) or `git`.
    #[arg(long)]
    pub backend: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// History JSON: `{ path: { versions, timestamps } }`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the snapshot here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of files folded concurrently.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Drop files whose history cannot be reconciled instead of failing.
    #[arg(long)]
    pub skip_failed: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug)]
pub struct PartitionArgs {
    /// Older version of the file.
    pub parent: PathBuf,

    /// Newer version of the file.
    pub child: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// History JSON: `{ path: { versions, timestamps } }`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// File path (key in the history document) to fold.
    #[arg(short, long)]
    pub file: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
