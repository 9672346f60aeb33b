//! Config struct definition and default implementation.

use crate::prompt::PromptVariant;
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "scoop.yaml";

/// Levels accepted by `log_level`.
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Configuration for the scoop CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Variant used when a command gets no `--variant`.
    pub default_variant: PromptVariant,

    /// Root directory of the file store.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether saves append to the history log.
    #[serde(default = "default_true")]
    pub history_enabled: bool,

    /// Whether `check` exits non-zero on round-trip drift.
    #[serde(default = "default_true")]
    pub strict_round_trip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_variant: PromptVariant::default(),
            store_dir: default_store_dir(),
            log_level: default_log_level(),
            history_enabled: default_true(),
            strict_round_trip: default_true(),
        }
    }
}

fn default_store_dir() -> String {
    ".scoop".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}
