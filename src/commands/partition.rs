//! Implementation of the `linetrace partition` command.

use super::resolve_config;
use crate::cli::PartitionArgs;
use crate::diff::{diff_texts, join_lines, provider_for};
use crate::error::{Result, TraceError};
use std::path::Path;

/// Execute the `linetrace partition` command.
///
/// Prints the windows between the two files as pretty JSON.
pub fn cmd_partition(args: PartitionArgs) -> Result<()> {
    let config = resolve_config(&args.config)?;
    config.validate()?;

    let parent = read_text(&args.parent)?;
    let child = read_text(&args.child)?;

    let provider = provider_for(&config);
    let partition = diff_texts(provider.as_ref(), &parent, &child)?;

    let json = serde_json::to_string_pretty(partition.windows())
        .map_err(|e| TraceError::UserError(format!("failed to serialize partition: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Read a file as normalized text (every line `\n`-terminated).
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TraceError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })?;
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    Ok(join_lines(&lines))
}
