//! Implementation of the `linetrace status` command.

use super::resolve_config;
use crate::cli::StatusArgs;
use crate::driver::{Driver, load_history};
use crate::error::{Result, TraceError};
use crate::timefmt::TimeFormat;

/// Execute the `linetrace status` command.
///
/// Folds the named file's history and prints its base/head status tables.
pub fn cmd_status(args: StatusArgs) -> Result<()> {
    let config = resolve_config(&args.config)?;
    config.validate()?;

    let history = load_history(&args.input)?;
    let file = history.get(&args.file).ok_or_else(|| {
        TraceError::UserError(format!(
            "file '{}' not found in '{}'",
            args.file,
            args.input.display()
        ))
    })?;

    let format = TimeFormat::from_config(&config);
    let driver = Driver::new(config);

    match driver
        .track_file(&args.file, file)
        .map_err(|e| e.in_file(&args.file))?
    {
        Some(state) => print!("{}", state.status_table(&format)),
        None => println!("{}: no captured versions", args.file),
    }
    Ok(())
}
