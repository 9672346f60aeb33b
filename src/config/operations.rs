//! Config loading, validation, and discovery.

use super::model::{CONFIG_FILE, Config, LOG_LEVELS};
use crate::error::{Result, ScoopError};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoopError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config for a command invocation.
    ///
    /// An explicit path must exist. Otherwise `scoop.yaml` in `dir` is used
    /// when present, and the defaults when not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ScoopError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ScoopError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `store_dir` must be non-empty
    /// - `log_level` must be one of [`LOG_LEVELS`] (case-insensitive)
    pub fn validate(&self) -> Result<()> {
        if self.store_dir.trim().is_empty() {
            return Err(ScoopError::UserError(
                "config validation failed: store_dir must be non-empty".to_string(),
            ));
        }

        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ScoopError::UserError(format!(
                "config validation failed: unknown log_level '{}' (expected one of: {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// The store root, resolved against `dir` when relative.
    pub fn store_root(&self, dir: &Path) -> PathBuf {
        let path = Path::new(&self.store_dir);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        }
    }
}
