//! Filesystem helpers for writing snapshot output.

pub mod atomic;

pub use atomic::{atomic_write, write_json};
