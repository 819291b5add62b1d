//! Recently opened pages, persisted as a most-recent-first id list
//!
//! Wire format under [`HISTORY_KEY`]: a JSON array of integers.

use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::DeclarationIdentifier;
use crate::error::Result;

use super::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "history";

/// Read the persisted history. Missing or unreadable data is an empty history.
pub fn read_history(storage: &dyn KeyValueStore) -> Vec<DeclarationIdentifier> {
    let value = match storage.get(HISTORY_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "Failed to read history, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_value::<Vec<u64>>(value) {
        Ok(indexes) => indexes
            .into_iter()
            .map(DeclarationIdentifier::from_raw)
            .collect(),
        Err(err) => {
            warn!(error = %err, "Persisted history is malformed, ignoring it");
            Vec::new()
        }
    }
}

pub fn write_history(storage: &dyn KeyValueStore, ids: &[DeclarationIdentifier]) -> Result<()> {
    let indexes: Vec<u64> = ids.iter().map(|id| id.index()).collect();
    debug!(history = ?indexes, "Update history");
    storage.set(HISTORY_KEY, Value::from(indexes))
}

/// Move `id` to the front, dropping any earlier occurrence, and keep at most
/// `limit` entries.
pub fn push_recent(history: &mut Vec<DeclarationIdentifier>, id: DeclarationIdentifier, limit: usize) {
    history.retain(|existing| *existing != id);
    history.insert(0, id);
    history.truncate(limit);
}
