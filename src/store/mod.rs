//! Persistence collaborator for agent prompts.
//!
//! The compiler never persists anything itself. A store keeps one
//! [`StoredPrompt`] per (workshop id, agent type): the structured record plus
//! the prompt text last rendered from it.

mod file;

#[cfg(test)]
mod tests;

pub use file::FileStore;

use crate::error::Result;
use crate::prompt::{AgentPromptRecord, PromptVariant, render};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record as persisted, with its rendered prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPrompt {
    pub workshop_id: String,
    pub agent_type: PromptVariant,
    pub record: AgentPromptRecord,
    /// The prompt text handed to the language model.
    pub generated_prompt: String,
    pub updated_at: DateTime<Utc>,
    /// Who saved it (e.g., `user@HOST`).
    pub updated_by: String,
}

impl StoredPrompt {
    /// Render a record and stamp it for saving.
    pub fn from_record(
        workshop_id: impl Into<String>,
        agent_type: PromptVariant,
        record: AgentPromptRecord,
    ) -> Self {
        let generated_prompt = render(&record, agent_type);
        Self {
            workshop_id: workshop_id.into(),
            agent_type,
            record,
            generated_prompt,
            updated_at: Utc::now(),
            updated_by: crate::history::actor_string(),
        }
    }

    /// Whether the stored prompt still matches its record.
    pub fn is_current(&self) -> bool {
        render(&self.record, self.agent_type) == self.generated_prompt
    }
}

/// Loads and saves prompts keyed by (workshop id, agent type).
pub trait PromptStore {
    /// Load one prompt; `Ok(None)` when nothing is stored under the key.
    fn load(&self, workshop_id: &str, agent_type: PromptVariant) -> Result<Option<StoredPrompt>>;

    /// Create or replace the prompt under its key.
    ///
    /// Succeeds once the prompt itself is written; a failure to record the
    /// save in the history log is only logged.
    fn save(&self, prompt: &StoredPrompt) -> Result<()>;

    /// Every prompt stored for a workshop, ordered by agent type.
    fn list(&self, workshop_id: &str) -> Result<Vec<StoredPrompt>>;
}
