//! Scoop: prompt compiler for workshop AI-journalist agents.
//!
//! The [`prompt`] module is the compiler proper and has no I/O. The outer
//! modules wrap it for the `scoop` binary: configuration, a YAML file store
//! with a save history, and a structural prompt validator.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod history;
pub mod prompt;
pub mod store;
pub mod validate;
