//! Filesystem helpers for the prompt store.

mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
