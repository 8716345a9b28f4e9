//! Command implementations for linetrace.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the config resolution shared by all of them.

mod partition;
mod process;
mod status;


use crate::cli::{Command, ConfigArgs};
use crate::config::{Config, DiffBackend};
use crate::error::{Result, TraceError};
use tracing::debug;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Process(args) => process::cmd_process(args),
        Command::Partition(args) => partition::cmd_partition(args),
        Command::Status(args) => status::cmd_status(args),
    }
}

/// Load the config named on the command line (or defaults) and apply the
/// shared flag overrides.
pub(crate) fn resolve_config(args: &ConfigArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(name) = &args.backend {
        config.diff_backend = DiffBackend::from_str(name).ok_or_else(|| {
            TraceError::UserError(format!(
                "unknown diff backend '{}' (expected 'imara' or 'git')",
                name
            ))
        })?;
    }

    debug!(?config, "resolved configuration");
    Ok(config)
}
