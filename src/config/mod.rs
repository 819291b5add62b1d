//! Configuration module - catalog host settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.storybook/config.json
//! - Default values for all settings
//! - The [`StorybookConfig`] type
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definition
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_CATALOG_TITLE, DEFAULT_CONFIG_PATH, DEFAULT_HISTORY_LIMIT,
    DEFAULT_PREVIEW_FOLDER_TITLE, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_STORAGE_DIR,
    DEFAULT_STORAGE_SUITE,
};
pub use loader::{default_config_path, load_config};
pub use types::StorybookConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
