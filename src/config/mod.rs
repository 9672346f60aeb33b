//! Configuration model for scoop.
//!
//! This module defines the Config struct that represents `scoop.yaml`.
//! Unknown fields are ignored and every field has a default, so an empty or
//! missing file is a valid configuration.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::{CONFIG_FILE, Config, LOG_LEVELS};
