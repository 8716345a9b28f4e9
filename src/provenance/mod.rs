//! Revert-aware line provenance tracking.
//!
//! Each file keeps two arenas of line records:
//! - the base status, pinned to the oldest captured version (fixed length)
//! - the head status, tracking the most recently applied version
//!
//! Every new version is diffed against both the head and the base. The head
//! diff says which lines changed since the last capture; the base diff says
//! whether a changed line is new or restores content the base already had.
//! Restored content keeps the base timestamp.

mod reconcile;
mod record;


pub use reconcile::reconcile;
pub use record::{FileTrackState, LineRecord};
