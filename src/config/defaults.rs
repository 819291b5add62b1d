//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Where the host looks for its config file
pub const DEFAULT_CONFIG_PATH: &str = "~/.storybook/config.json";

/// Title of the catalog root folder
pub const DEFAULT_CATALOG_TITLE: &str = "Storybook";

/// Title of the folder holding discovered previews
pub const DEFAULT_PREVIEW_FOLDER_TITLE: &str = "#Preview macro";

/// Directory holding the key-value store (tilde-expanded)
pub const DEFAULT_STORAGE_DIR: &str = "~/.storybook";

/// Name of the key-value store; the file is `<storage_dir>/<suite>.json`
pub const DEFAULT_STORAGE_SUITE: &str = "storybook";

/// Recently opened pages to remember
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Delay before a submitted search starts
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 120;
