//! Catalog store
//!
//! Owns the flattened catalog ([`CatalogIndex`]) and the mutable state that
//! belongs to the owning context: the recently-opened history. History is
//! persisted through a [`KeyValueStore`] so it survives restarts.

mod history;
mod index;
mod preferences;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::{CatalogFolder, CatalogPage, DeclarationIdentifier, Node};
use crate::error::ResultExt;
use crate::search::SearchSession;

pub use history::{push_recent, read_history, write_history, HISTORY_KEY};
pub use index::{CatalogIndex, FolderEntry, SearchHit};
pub use preferences::{Preferences, AUTO_OPEN_LAST_PAGE_KEY, DEFAULT_AUTO_OPEN_LAST_PAGE};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Maximum number of recently opened pages kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

pub struct CatalogStore {
    index: Arc<CatalogIndex>,
    storage: Arc<dyn KeyValueStore>,
    history_limit: usize,
    history: Vec<Arc<CatalogPage>>,
}

impl CatalogStore {
    /// Flatten `root` and rehydrate history from `storage`.
    pub fn new(root: Arc<CatalogFolder>, storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            index: Arc::new(CatalogIndex::new(root)),
            storage,
            history_limit: DEFAULT_HISTORY_LIMIT,
            history: Vec::new(),
        };
        store.refresh_history();
        info!(
            title = store.title(),
            page_count = store.index.page_count(),
            history_len = store.history.len(),
            "Catalog store ready"
        );
        store
    }

    /// Cap history at `limit` entries, dropping rehydrated entries past it.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self.history.truncate(self.history_limit);
        self
    }

    pub fn title(&self) -> &str {
        self.index.root().title()
    }

    pub fn root(&self) -> &Arc<CatalogFolder> {
        self.index.root()
    }

    pub fn index(&self) -> &Arc<CatalogIndex> {
        &self.index
    }

    pub fn page(&self, id: DeclarationIdentifier) -> Option<&Arc<CatalogPage>> {
        self.index.page(id)
    }

    /// Recently opened pages, most recent first.
    pub fn history_pages(&self) -> &[Arc<CatalogPage>] {
        &self.history
    }

    pub fn history_ids(&self) -> Vec<DeclarationIdentifier> {
        self.history.iter().map(|page| page.id()).collect()
    }

    /// Move `id` to the front of the persisted history.
    ///
    /// Ids unknown to this catalog are ignored. A failed write is logged and
    /// the in-memory history still reflects what storage holds.
    pub fn record_open(&mut self, id: DeclarationIdentifier) {
        if !self.index.contains(id) {
            debug!(%id, "Ignoring open of unknown page");
            return;
        }

        let mut ids = read_history(self.storage.as_ref());
        push_recent(&mut ids, id, self.history_limit);
        write_history(self.storage.as_ref(), &ids).warn_on_err();

        self.refresh_history();
    }

    fn refresh_history(&mut self) {
        let ids = read_history(self.storage.as_ref());
        let index = &self.index;
        self.history = ids
            .into_iter()
            .filter_map(|id| {
                let page = index.page(id).cloned();
                if page.is_none() {
                    debug!(%id, "Dropping stale history entry");
                }
                page
            })
            .collect();
    }

    /// Ranked folders and pages matching `query`; empty for a blank query.
    pub fn search(&self, query: &str) -> Vec<Node> {
        self.index.search(query)
    }

    /// A debounced, cancellable search over this store's catalog.
    pub fn search_session(&self, debounce: Duration) -> SearchSession {
        SearchSession::new(Arc::clone(&self.index), debounce)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
