//! Implementation of the `linetrace process` command.

use super::resolve_config;
use crate::cli::ProcessArgs;
use crate::config::FileErrorPolicy;
use crate::driver::{Driver, load_history};
use crate::error::{Result, TraceError};
use crate::fs::write_json;
use tracing::info;

/// Execute the `linetrace process` command.
///
/// Writes the snapshot as pretty JSON to `--output` (atomically) or stdout.
/// Files dropped under `--skip-failed` are listed on stderr.
pub fn cmd_process(args: ProcessArgs) -> Result<()> {
    let mut config = resolve_config(&args.config)?;
    if let Some(jobs) = args.jobs {
        config.max_parallel_files = jobs;
    }
    if args.skip_failed {
        config.on_file_error = FileErrorPolicy::Skip;
    }
    config.validate()?;

    let history = load_history(&args.input)?;
    info!(input = %args.input.display(), files = history.len(), "loaded history");

    let snapshot = Driver::new(config).process(&history)?;

    for (path, reason) in snapshot.failed_files() {
        eprintln!("Skipped {}: {}", path, reason);
    }

    match &args.output {
        Some(path) => write_json(path, &snapshot),
        None => {
            let json = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| TraceError::UserError(format!("failed to serialize output: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}
