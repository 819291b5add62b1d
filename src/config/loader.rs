//! Configuration loading from file system

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::StorybookConfig;

/// `~/.storybook/config.json`, tilde-expanded
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from a JSON file.
///
/// Returns `StorybookConfig::default()` if the file is missing, unreadable or
/// not valid JSON. Loading never fails the host.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> StorybookConfig {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return StorybookConfig::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to read config file, using defaults");
            return StorybookConfig::default();
        }
    };

    match serde_json::from_str::<StorybookConfig>(&content) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            let error_hint = if e.to_string().contains("invalid type") {
                "\n\nHint: historyLimit and searchDebounceMs are numbers, the other fields are strings."
            } else {
                ""
            };
            warn!(
                error = %e,
                hint = %error_hint,
                "Failed to parse config JSON, using defaults"
            );
            StorybookConfig::default()
        }
    }
}
