//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Host configuration. Every field is optional; getters fall back to the
/// defaults in `defaults.rs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorybookConfig {
    /// Title of the catalog root (default: "Storybook")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_title: Option<String>,
    /// Title of the folder holding discovered previews (default: "#Preview macro")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_folder_title: Option<String>,
    /// Directory for persisted history and preferences (default: ~/.storybook)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<String>,
    /// Key-value store name (default: "storybook")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_suite: Option<String>,
    /// Number of recently opened pages to keep (default: 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Search debounce in milliseconds (default: 120)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
}

impl StorybookConfig {
    pub fn get_catalog_title(&self) -> String {
        self.catalog_title
            .clone()
            .unwrap_or_else(|| DEFAULT_CATALOG_TITLE.to_string())
    }

    pub fn get_preview_folder_title(&self) -> String {
        self.preview_folder_title
            .clone()
            .unwrap_or_else(|| DEFAULT_PREVIEW_FOLDER_TITLE.to_string())
    }

    /// Storage directory with `~` expanded
    pub fn get_storage_dir(&self) -> PathBuf {
        let dir = self.storage_dir.as_deref().unwrap_or(DEFAULT_STORAGE_DIR);
        PathBuf::from(shellexpand::tilde(dir).as_ref())
    }

    pub fn get_storage_suite(&self) -> String {
        self.storage_suite
            .clone()
            .unwrap_or_else(|| DEFAULT_STORAGE_SUITE.to_string())
    }

    /// Path of the key-value store file: `<storage_dir>/<suite>.json`
    pub fn storage_path(&self) -> PathBuf {
        self.get_storage_dir()
            .join(format!("{}.json", self.get_storage_suite()))
    }

    /// History limit, never below 1
    pub fn get_history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT).max(1)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS))
    }
}
