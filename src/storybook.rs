//! Catalog assembly
//!
//! [`Storybook`] wires the pieces together: discovered previews are adapted
//! and grouped under the preview folder, hand-written nodes sit next to it
//! under the root, and the resulting tree backs a [`CatalogStore`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::catalog::{CatalogFolder, CatalogPage, DeclarationIdentifier, IdAllocator, Node, View};
use crate::config::StorybookConfig;
use crate::error::{Result, StorybookError};
use crate::logging;
use crate::preview::{adapt_all, build_preview_tree, PreviewDescriptor};
use crate::search::SearchSession;
use crate::store::{CatalogStore, JsonFileStore, KeyValueStore, Preferences};

const BUILD_PERF_THRESHOLD_MS: u64 = 100;

/// Build the root folder: manual nodes plus, when there are previews, the
/// preview folder holding one folder per module.
pub fn build_root(
    config: &StorybookConfig,
    allocator: &IdAllocator,
    previews: &[PreviewDescriptor],
    manual: Vec<Node>,
) -> CatalogFolder {
    let preview_nodes = build_preview_tree(allocator, adapt_all(previews));

    let mut children = manual;
    if !preview_nodes.is_empty() {
        children.push(CatalogFolder::new(config.get_preview_folder_title(), preview_nodes).into());
    }
    CatalogFolder::new(config.get_catalog_title(), children)
}

pub struct Storybook {
    store: CatalogStore,
    preferences: Preferences,
    search_debounce: Duration,
}

impl Storybook {
    #[instrument(skip_all, fields(preview_count = previews.len(), manual_count = manual.len()))]
    pub fn new(
        config: &StorybookConfig,
        storage: Arc<dyn KeyValueStore>,
        allocator: &IdAllocator,
        previews: &[PreviewDescriptor],
        manual: Vec<Node>,
    ) -> Self {
        let started = Instant::now();
        let root = Arc::new(build_root(config, allocator, previews, manual));
        let store = CatalogStore::new(root, Arc::clone(&storage))
            .with_history_limit(config.get_history_limit());
        logging::log_perf(
            "build_catalog",
            started.elapsed().as_millis() as u64,
            BUILD_PERF_THRESHOLD_MS,
        );

        Self {
            store,
            preferences: Preferences::new(storage),
            search_debounce: config.search_debounce(),
        }
    }

    /// Open the storage file named by `config` and build the catalog.
    ///
    /// Never fails: unreadable storage starts with empty history.
    pub fn open(
        config: &StorybookConfig,
        allocator: &IdAllocator,
        previews: &[PreviewDescriptor],
        manual: Vec<Node>,
    ) -> Self {
        let storage = JsonFileStore::open(config.storage_path());
        Self::new(config, Arc::new(storage), allocator, previews, manual)
    }

    pub fn title(&self) -> &str {
        self.store.title()
    }

    pub fn root(&self) -> &Arc<CatalogFolder> {
        self.store.root()
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CatalogStore {
        &mut self.store
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Page to show on launch: the most recent history entry, if the
    /// auto-open preference is on.
    pub fn launch_page(&self) -> Option<Arc<CatalogPage>> {
        if !self.preferences.auto_open_last_page() {
            return None;
        }
        let page = self.store.history_pages().first().cloned();
        if let Some(page) = &page {
            info!(page_id = page.id().index(), title = page.title(), "Auto-opening last page");
        }
        page
    }

    /// Render a page without touching history.
    pub fn render(&self, id: DeclarationIdentifier) -> Result<View> {
        self.store
            .page(id)
            .map(|page| page.render())
            .ok_or(StorybookError::UnknownPage(id.index()))
    }

    /// Record the open in history and render the page.
    pub fn open_page(&mut self, id: DeclarationIdentifier) -> Result<View> {
        let page = self
            .store
            .page(id)
            .cloned()
            .ok_or(StorybookError::UnknownPage(id.index()))?;
        self.store.record_open(id);
        logging::log_catalog_event("opened", id.index(), page.title());
        Ok(page.render())
    }

    pub fn search_session(&self) -> SearchSession {
        self.store.search_session(self.search_debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::schema::{DECLARATIVE_SOURCE_V1, DISPLAY_NAME_FIELD, SOURCE_FIELD};
    use crate::preview::Record;
    use crate::store::MemoryStore;

    fn legacy(file_id: &str, line: u32, title: &str) -> PreviewDescriptor {
        let record = Record::new("payload")
            .with_str(DISPLAY_NAME_FIELD, title)
            .with_record(
                SOURCE_FIELD,
                Record::new(DECLARATIVE_SOURCE_V1).with_factory("makeView", || View::text("body")),
            );
        PreviewDescriptor::from_record(file_id, line, 1, record)
    }

    fn manual(allocator: &IdAllocator) -> Vec<Node> {
        vec![
            CatalogPage::with_destination(allocator, "Docs/Intro.rs", 1, "Introduction", || {
                View::text("hello")
            })
            .into(),
        ]
    }

    #[test]
    fn test_root_layout() {
        let allocator = IdAllocator::new();
        let previews = vec![legacy("App/Button.rs", 3, "Button"), legacy("Kit/Card.rs", 9, "Card")];
        let book = Storybook::new(
            &StorybookConfig::default(),
            Arc::new(MemoryStore::new()),
            &allocator,
            &previews,
            manual(&allocator),
        );

        assert_eq!(book.title(), "Storybook");
        let children = book.root().children();
        assert_eq!(children.len(), 2);
        let preview_folder = children[0].as_folder().unwrap();
        assert_eq!(preview_folder.title(), "#Preview macro");
        let modules: Vec<_> = preview_folder.children().iter().map(Node::title).collect();
        assert_eq!(modules, vec!["App", "Kit"]);
        assert_eq!(children[1].title(), "Introduction");
    }

    #[test]
    fn test_no_previews_means_no_preview_folder() {
        let allocator = IdAllocator::new();
        let book = Storybook::new(
            &StorybookConfig::default(),
            Arc::new(MemoryStore::new()),
            &allocator,
            &[],
            manual(&allocator),
        );
        assert!(book.root().children().iter().all(|node| !node.is_folder()));
    }

    #[test]
    fn test_launch_page_follows_preference() {
        let allocator = IdAllocator::new();
        let mut book = Storybook::new(
            &StorybookConfig::default(),
            Arc::new(MemoryStore::new()),
            &allocator,
            &[legacy("App/Button.rs", 3, "Button")],
            manual(&allocator),
        );
        assert!(book.launch_page().is_none());

        let intro = book.root().all_pages().iter().find(|p| p.title() == "Introduction").unwrap().id();
        let view = book.open_page(intro).unwrap();
        assert_eq!(view, View::Scroll(Box::new(View::text("hello"))));
        assert_eq!(book.launch_page().map(|p| p.id()), Some(intro));

        book.preferences().set_auto_open_last_page(false).unwrap();
        assert!(book.launch_page().is_none());
    }

    #[test]
    fn test_unknown_page_errors() {
        let allocator = IdAllocator::new();
        let mut book = Storybook::new(
            &StorybookConfig::default(),
            Arc::new(MemoryStore::new()),
            &allocator,
            &[],
            Vec::new(),
        );
        let missing = DeclarationIdentifier::from_raw(77);
        assert!(matches!(book.render(missing), Err(StorybookError::UnknownPage(77))));
        assert!(matches!(book.open_page(missing), Err(StorybookError::UnknownPage(77))));
        assert!(book.store().history_pages().is_empty());
    }

    #[test]
    fn test_open_with_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorybookConfig {
            storage_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let allocator = IdAllocator::new();
        let book = Storybook::open(&config, &allocator, &[], manual(&allocator));
        assert_eq!(book.store().index().page_count(), 1);
    }

    #[test]
    fn test_open_with_corrupt_storage_still_builds_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorybookConfig {
            storage_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        std::fs::write(config.storage_path(), "{oops").unwrap();

        let allocator = IdAllocator::new();
        let mut book = Storybook::open(&config, &allocator, &[], manual(&allocator));
        assert!(book.store().history_pages().is_empty());
        assert!(book.preferences().auto_open_last_page());

        let intro = book.root().all_pages()[0].id();
        book.open_page(intro).unwrap();
        assert_eq!(book.store().history_ids(), vec![intro]);
    }
}
