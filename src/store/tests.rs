//! Tests for the file store.

use super::*;
use crate::history::{HistoryAction, read_recent};
use crate::prompt::TemplateRegistry;
use tempfile::TempDir;

fn store() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("prompts"));
    (temp_dir, store)
}

#[test]
fn test_load_missing_returns_none() {
    let (_temp_dir, store) = store();
    assert!(store.load("ws-1", PromptVariant::Nuggets).unwrap().is_none());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_dir, store) = store();
    let record = TemplateRegistry::default_record(PromptVariant::Nuggets);
    let prompt = StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record);

    store.save(&prompt).unwrap();
    let loaded = store.load("ws-1", PromptVariant::Nuggets).unwrap().unwrap();

    assert_eq!(loaded, prompt);
    assert!(loaded.is_current());
}

#[test]
fn test_save_replaces_existing() {
    let (_temp_dir, store) = store();
    let mut record = TemplateRegistry::default_record(PromptVariant::Lightbulbs);
    store
        .save(&StoredPrompt::from_record("ws-1", PromptVariant::Lightbulbs, record.clone()))
        .unwrap();

    record.agent_name = "Bright".to_string();
    store
        .save(&StoredPrompt::from_record("ws-1", PromptVariant::Lightbulbs, record))
        .unwrap();

    let loaded = store.load("ws-1", PromptVariant::Lightbulbs).unwrap().unwrap();
    assert_eq!(loaded.record.agent_name, "Bright");
    assert!(loaded.generated_prompt.contains("\"Bright\""));
}

#[test]
fn test_keys_are_independent() {
    let (_temp_dir, store) = store();
    for variant in [PromptVariant::Nuggets, PromptVariant::Nexus] {
        let record = TemplateRegistry::default_record(variant);
        store
            .save(&StoredPrompt::from_record("ws-1", variant, record))
            .unwrap();
    }

    let listed = store.list("ws-1").unwrap();
    let types: Vec<_> = listed.iter().map(|p| p.agent_type).collect();
    assert_eq!(types, vec![PromptVariant::Nuggets, PromptVariant::Nexus]);
    assert!(store.list("ws-2").unwrap().is_empty());
}

#[test]
fn test_rejects_unsafe_workshop_ids() {
    let (_temp_dir, store) = store();
    for id in ["", "../escape", "a/b", ".hidden", "with space"] {
        let err = store.load(id, PromptVariant::Nuggets).unwrap_err();
        assert!(matches!(err, crate::error::ScoopError::UserError(_)), "{}", id);
    }
}

#[test]
fn test_save_appends_history() {
    let (_temp_dir, store) = store();
    let mut record = TemplateRegistry::default_record(PromptVariant::Nuggets);
    store
        .save(&StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record.clone()))
        .unwrap();

    record.raw_prompt = Some("hand written".to_string());
    let raw = StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record);
    assert_eq!(raw.generated_prompt, "hand written");
    store.save(&raw).unwrap();

    let events = read_recent(store.root(), 10).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, HistoryAction::Save);
    assert_eq!(events[1].action, HistoryAction::RawSave);
    assert_eq!(events[1].details["bytes"], 12);
}

#[test]
fn test_history_can_be_disabled() {
    let (_temp_dir, store) = store();
    let store = store.with_history(false);
    let record = TemplateRegistry::default_record(PromptVariant::Nuggets);
    store
        .save(&StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record))
        .unwrap();

    assert!(read_recent(store.root(), 10).unwrap().is_empty());
}

#[test]
fn test_stale_generated_prompt_detected() {
    let record = TemplateRegistry::default_record(PromptVariant::Nuggets);
    let mut prompt = StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record);
    prompt.record.rules.push("New rule".to_string());
    assert!(!prompt.is_current());
}

#[test]
fn test_history_failure_does_not_fail_save() {
    let (_temp_dir, store) = store();
    std::fs::create_dir_all(crate::history::history_file_path(store.root())).unwrap();

    let record = TemplateRegistry::default_record(PromptVariant::Nuggets);
    let prompt = StoredPrompt::from_record("ws-1", PromptVariant::Nuggets, record);
    store.save(&prompt).unwrap();

    let loaded = store.load("ws-1", PromptVariant::Nuggets).unwrap().unwrap();
    assert_eq!(loaded, prompt);
}
