//! Tests for config functionality.

use crate::config::{CONFIG_FILE, Config};
use crate::error::ScoopError;
use crate::prompt::PromptVariant;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.default_variant, PromptVariant::Nuggets);
    assert_eq!(config.store_dir, ".scoop");
    assert_eq!(config.log_level, "warn");
    assert!(config.history_enabled);
    assert!(config.strict_round_trip);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
default_variant: lightbulbs
strict_round_trip: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.default_variant, PromptVariant::Lightbulbs);
    assert!(!config.strict_round_trip);
    assert_eq!(config.store_dir, ".scoop");
    assert!(config.history_enabled);
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
store_dir: prompts
future_option: 42
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.store_dir, "prompts");
}

#[test]
fn test_unknown_variant_is_rejected() {
    let err = Config::from_yaml("default_variant: partner-x").unwrap_err();
    assert!(matches!(err, ScoopError::UserError(_)));
}

#[test]
fn test_validation_empty_store_dir() {
    let err = Config::from_yaml("store_dir: '  '").unwrap_err();
    assert!(err.to_string().contains("store_dir"));
}

#[test]
fn test_validation_log_level() {
    assert!(Config::from_yaml("log_level: DEBUG").is_ok());

    let err = Config::from_yaml("log_level: loud").unwrap_err();
    assert!(err.to_string().contains("unknown log_level 'loud'"));
}

#[test]
fn test_yaml_round_trip() {
    let config = Config {
        default_variant: PromptVariant::Nexus,
        history_enabled: false,
        ..Default::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("default_variant: nexus"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_discover_prefers_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let explicit = temp_dir.path().join("custom.yaml");
    std::fs::write(&explicit, "store_dir: custom").unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE), "store_dir: local").unwrap();

    let config = Config::discover(Some(&explicit), temp_dir.path()).unwrap();
    assert_eq!(config.store_dir, "custom");
}

#[test]
fn test_discover_falls_back_to_local_then_defaults() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(Config::discover(None, temp_dir.path()).unwrap(), Config::default());

    std::fs::write(temp_dir.path().join(CONFIG_FILE), "store_dir: local").unwrap();
    let config = Config::discover(None, temp_dir.path()).unwrap();
    assert_eq!(config.store_dir, "local");
}

#[test]
fn test_store_root_resolution() {
    let config = Config::default();
    assert_eq!(config.store_root(Path::new("/work")), Path::new("/work/.scoop"));

    let absolute = Config {
        store_dir: "/var/scoop".to_string(),
        ..Default::default()
    };
    assert_eq!(absolute.store_root(Path::new("/work")), Path::new("/var/scoop"));
}
