//! Append-only history of store mutations.
//!
//! Every save to the file store appends one event to `<store>/history.ndjson`
//! (one JSON object per line).
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `save` or `raw_save` (a prompt saved in RawOverride mode)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `workshop`: workshop id
//! - `agent_type`: prompt variant
//! - `details`: freeform object with action-specific details

use crate::error::{Result, ScoopError};
use crate::prompt::PromptVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the history log inside the store directory.
pub const HISTORY_FILE: &str = "history.ndjson";

/// Actions that can be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// A structured record was rendered and saved.
    Save,
    /// A record in RawOverride mode was saved.
    RawSave,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryAction::Save => write!(f, "save"),
            HistoryAction::RawSave => write!(f, "raw_save"),
        }
    }
}

/// One entry of the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub ts: DateTime<Utc>,
    pub action: HistoryAction,
    /// Who performed the action (e.g., `user@HOST`).
    pub actor: String,
    pub workshop: String,
    pub agent_type: PromptVariant,
    pub details: Value,
}

impl HistoryEvent {
    /// Create an event stamped with the current time and actor.
    pub fn new(action: HistoryAction, workshop: impl Into<String>, agent_type: PromptVariant) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            workshop: workshop.into(),
            agent_type,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ScoopError::StoreError(format!("failed to serialize history event: {}", e))
        })
    }
}

/// The actor string recorded on events and stored prompts.
pub fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Path of the history log for a store root.
pub fn history_file_path(store_root: &Path) -> PathBuf {
    store_root.join(HISTORY_FILE)
}

/// Append an event to the history log, creating the file if needed.
pub fn append_event(store_root: &Path, event: &HistoryEvent) -> Result<()> {
    let path = history_file_path(store_root);
    let line = event.to_ndjson_line()?;

    fs::create_dir_all(store_root).map_err(|e| {
        ScoopError::StoreError(format!(
            "failed to create store directory '{}': {}",
            store_root.display(),
            e
        ))
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            ScoopError::StoreError(format!(
                "failed to open history file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", line).map_err(|e| {
        ScoopError::StoreError(format!(
            "failed to write history event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        ScoopError::StoreError(format!(
            "failed to sync history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read the most recent `limit` events, oldest first.
///
/// A missing log reads as empty. Lines that do not parse are skipped with a
/// warning.
pub fn read_recent(store_root: &Path, limit: usize) -> Result<Vec<HistoryEvent>> {
    let path = history_file_path(store_root);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        ScoopError::StoreError(format!(
            "failed to read history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut events: Vec<HistoryEvent> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(line = i + 1, error = %e, "skipping unreadable history line");
                None
            }
        })
        .collect();

    if events.len() > limit {
        events.drain(..events.len() - limit);
    }
    Ok(events)
}
