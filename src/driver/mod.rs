//! Multi-file driver: history in, annotated snapshot out.
//!
//! For each file the driver starts tracking from the first captured version,
//! reconciles every later version in order, then assembles one snapshot over
//! all files. Files never share state, so they may be folded in parallel.

mod history;
mod process;


pub use history::{FileHistory, History, load_history};
pub use process::{Driver, process};
