use super::*;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = StorybookConfig::default();
    assert_eq!(config.get_catalog_title(), DEFAULT_CATALOG_TITLE);
    assert_eq!(config.get_preview_folder_title(), "#Preview macro");
    assert_eq!(config.get_storage_suite(), "storybook");
    assert_eq!(config.get_history_limit(), 5);
    assert_eq!(config.search_debounce(), Duration::from_millis(120));
}

#[test]
fn test_storage_path_expands_tilde() {
    let config = StorybookConfig::default();
    let path = config.storage_path();
    assert!(!path.to_string_lossy().contains('~'));
    assert!(path.ends_with(".storybook/storybook.json"));

    let config = StorybookConfig {
        storage_dir: Some("/var/tmp/catalog".to_string()),
        storage_suite: Some("suite".to_string()),
        ..Default::default()
    };
    assert_eq!(
        config.storage_path(),
        std::path::PathBuf::from("/var/tmp/catalog/suite.json")
    );
}

#[test]
fn test_camel_case_fields() {
    let json = r#"{
        "catalogTitle": "Components",
        "historyLimit": 3,
        "searchDebounceMs": 0
    }"#;
    let config: StorybookConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.get_catalog_title(), "Components");
    assert_eq!(config.get_history_limit(), 3);
    assert_eq!(config.search_debounce(), Duration::ZERO);
    assert_eq!(config.get_preview_folder_title(), DEFAULT_PREVIEW_FOLDER_TITLE);
}

#[test]
fn test_zero_history_limit_clamped() {
    let config = StorybookConfig {
        history_limit: Some(0),
        ..Default::default()
    };
    assert_eq!(config.get_history_limit(), 1);
}

#[test]
fn test_serialization_skips_unset_fields() {
    let config = StorybookConfig {
        storage_suite: Some("custom".to_string()),
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"storageSuite":"custom"}"#);
    let back: StorybookConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("nope.json"));
    assert_eq!(config, StorybookConfig::default());
}

#[test]
fn test_load_invalid_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"historyLimit": "many"}"#).unwrap();
    assert_eq!(load_config(&path), StorybookConfig::default());
}

#[test]
fn test_load_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"previewFolderTitle": "Previews"}"#).unwrap();
    assert_eq!(load_config(&path).get_preview_folder_title(), "Previews");
}

#[test]
fn test_default_config_path() {
    let path = default_config_path();
    assert!(path.ends_with(".storybook/config.json"));
}
