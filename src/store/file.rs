//! YAML file store.
//!
//! Layout: `<root>/<workshop_id>/<agent_type>.yaml`, one file per key, each
//! written atomically. Saves are appended to the history log when enabled.

use super::{PromptStore, StoredPrompt};
use crate::error::{Result, ScoopError};
use crate::history::{HistoryAction, HistoryEvent, append_event};
use crate::prompt::PromptVariant;
use regex::Regex;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WORKSHOP_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$").expect("Invalid workshop ID regex")
});

/// Stores prompts as YAML files under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    history: bool,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            history: true,
        }
    }

    /// Enable or disable history logging.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.history = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding one key.
    pub fn prompt_path(&self, workshop_id: &str, agent_type: PromptVariant) -> Result<PathBuf> {
        validate_workshop_id(workshop_id)?;
        Ok(self
            .root
            .join(workshop_id)
            .join(format!("{}.yaml", agent_type)))
    }

    fn read(&self, path: &Path) -> Result<StoredPrompt> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoopError::StoreError(format!(
                "failed to read stored prompt '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ScoopError::StoreError(format!(
                "failed to parse stored prompt '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Workshop ids become directory names, so only a safe subset is accepted.
pub fn validate_workshop_id(workshop_id: &str) -> Result<()> {
    if WORKSHOP_ID_REGEX.is_match(workshop_id) {
        Ok(())
    } else {
        Err(ScoopError::UserError(format!(
            "invalid workshop id '{}': use letters, digits, '-' or '_' (max 64 characters)",
            workshop_id
        )))
    }
}

impl PromptStore for FileStore {
    fn load(&self, workshop_id: &str, agent_type: PromptVariant) -> Result<Option<StoredPrompt>> {
        let path = self.prompt_path(workshop_id, agent_type)?;
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }

    fn save(&self, prompt: &StoredPrompt) -> Result<()> {
        let path = self.prompt_path(&prompt.workshop_id, prompt.agent_type)?;
        let yaml = serde_yaml::to_string(prompt).map_err(|e| {
            ScoopError::StoreError(format!("failed to serialize stored prompt: {}", e))
        })?;

        crate::fs::atomic_write_file(&path, &yaml)?;

        tracing::info!(
            workshop = %prompt.workshop_id,
            agent_type = %prompt.agent_type,
            path = %path.display(),
            "saved prompt"
        );

        if self.history {
            let action = if prompt.record.is_raw() {
                HistoryAction::RawSave
            } else {
                HistoryAction::Save
            };
            let event = HistoryEvent::new(action, &prompt.workshop_id, prompt.agent_type)
                .with_details(json!({
                    "bytes": prompt.generated_prompt.len(),
                    "rules": prompt.record.rules.len(),
                    "questions": prompt.record.questions.len(),
                }));
            if let Err(e) = append_event(&self.root, &event) {
                tracing::warn!(
                    workshop = %prompt.workshop_id,
                    agent_type = %prompt.agent_type,
                    error = %e,
                    "prompt saved but history was not recorded"
                );
            }
        }

        Ok(())
    }

    fn list(&self, workshop_id: &str) -> Result<Vec<StoredPrompt>> {
        let mut prompts = Vec::new();
        for variant in PromptVariant::ALL {
            if let Some(prompt) = self.load(workshop_id, variant)? {
                prompts.push(prompt);
            }
        }
        Ok(prompts)
    }
}
