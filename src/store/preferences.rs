use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::Result;

use super::storage::KeyValueStore;

pub const AUTO_OPEN_LAST_PAGE_KEY: &str = "autoOpenLastPage";
pub const DEFAULT_AUTO_OPEN_LAST_PAGE: bool = true;

/// User preferences stored next to the history.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Whether the most recent history page opens on launch (default: true)
    pub fn auto_open_last_page(&self) -> bool {
        match self.storage.get(AUTO_OPEN_LAST_PAGE_KEY) {
            Ok(Some(Value::Bool(value))) => value,
            Ok(Some(other)) => {
                warn!(value = %other, "autoOpenLastPage is not a bool, using default");
                DEFAULT_AUTO_OPEN_LAST_PAGE
            }
            Ok(None) => DEFAULT_AUTO_OPEN_LAST_PAGE,
            Err(err) => {
                warn!(error = %err, "Failed to read autoOpenLastPage, using default");
                DEFAULT_AUTO_OPEN_LAST_PAGE
            }
        }
    }

    pub fn set_auto_open_last_page(&self, enabled: bool) -> Result<()> {
        self.storage.set(AUTO_OPEN_LAST_PAGE_KEY, Value::Bool(enabled))
    }
}
