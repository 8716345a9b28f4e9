//! Final annotated snapshot assembly.
//!
//! After every version of every file has been reconciled, the final base
//! and head texts of each file are diffed once more. Each edit window is
//! decorated with the provenance timestamps of its lines on both sides and
//! numbered with a global, gap-free index.

mod assemble;
mod types;


pub use assemble::{assemble, assemble_file, assemble_with};
pub use types::{AnnotatedEdit, Snapshot, SnapshotWindow};
