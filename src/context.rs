//! Invocation context for scoop commands.
//!
//! Resolves the working directory and configuration once, so every command
//! sees the same store root and default variant.

use crate::config::Config;
use crate::error::{Result, ScoopError};
use crate::prompt::{AgentPromptRecord, PromptVariant};
use crate::store::FileStore;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved environment for one command invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Directory relative paths in the config resolve against.
    pub cwd: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Resolve the context from the current directory.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            ScoopError::UserError(format!("failed to determine current directory: {}", e))
        })?;
        Self::resolve_in(cwd, config_path)
    }

    /// Resolve the context from a given directory.
    pub fn resolve_in(cwd: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config = Config::discover(config_path, &cwd)?;
        Ok(Self { cwd, config })
    }

    /// The variant named on the command line, or the configured default.
    pub fn variant(&self, name: Option<&str>) -> Result<PromptVariant> {
        match name {
            Some(name) => parse_variant(name),
            None => Ok(self.config.default_variant),
        }
    }

    /// The prompt store configured for this invocation.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.config.store_root(&self.cwd)).with_history(self.config.history_enabled)
    }

    /// Resolve a path argument against the working directory.
    pub fn path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Parse a variant name given on the command line.
///
/// Unlike the library lookup, an unknown name is an error here.
pub fn parse_variant(name: &str) -> Result<PromptVariant> {
    PromptVariant::from_str(name).ok_or_else(|| {
        let known: Vec<_> = PromptVariant::ALL.iter().map(|v| v.as_str()).collect();
        ScoopError::UserError(format!(
            "unknown variant '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })
}

/// Read a text file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ScoopError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Read a record from a YAML or JSON file.
pub fn read_record(path: &Path) -> Result<AgentPromptRecord> {
    let content = read_text(path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        ScoopError::UserError(format!(
            "failed to parse record '{}': {}",
            path.display(),
            e
        ))
    })
}
