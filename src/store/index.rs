//! Flattened, read-only view of a catalog tree
//!
//! Built once per catalog. Everything here is immutable after construction, so
//! a `CatalogIndex` behind an `Arc` is shared freely with background searches.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CatalogFolder, CatalogPage, DeclarationIdentifier, Node, NodeId};
use crate::search::FuzzyMatcher;

/// A folder reachable from the root, with the ids of every page below it.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    pub folder: Arc<CatalogFolder>,
    pub page_ids: HashSet<DeclarationIdentifier>,
}

/// One ranked search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub node: Node,
    pub score: f64,
}

#[derive(Debug)]
pub struct CatalogIndex {
    root: Arc<CatalogFolder>,
    pages: HashMap<DeclarationIdentifier, Arc<CatalogPage>>,
    folders: HashMap<String, FolderEntry>,
}

impl CatalogIndex {
    pub fn new(root: Arc<CatalogFolder>) -> Self {
        let pages: HashMap<_, _> = root
            .all_pages()
            .into_iter()
            .map(|page| (page.id(), page))
            .collect();

        // keyed by title: a later folder with the same title replaces an earlier one
        let mut folders = HashMap::new();
        for folder in root.all_folders() {
            let page_ids = folder.all_pages().iter().map(|page| page.id()).collect();
            folders.insert(
                folder.title().to_string(),
                FolderEntry { folder, page_ids },
            );
        }

        debug!(
            title = root.title(),
            page_count = pages.len(),
            folder_count = folders.len(),
            "Indexed catalog"
        );

        Self {
            root,
            pages,
            folders,
        }
    }

    pub fn root(&self) -> &Arc<CatalogFolder> {
        &self.root
    }

    pub fn page(&self, id: DeclarationIdentifier) -> Option<&Arc<CatalogPage>> {
        self.pages.get(&id)
    }

    pub fn contains(&self, id: DeclarationIdentifier) -> bool {
        self.pages.contains_key(&id)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn folder(&self, title: &str) -> Option<&FolderEntry> {
        self.folders.get(title)
    }

    /// Ids of every page below the folder titled `title`.
    pub fn pages_in_folder(&self, title: &str) -> Option<&HashSet<DeclarationIdentifier>> {
        self.folders.get(title).map(|entry| &entry.page_ids)
    }

    /// Pages in id order, i.e. declaration order.
    pub fn pages_by_id(&self) -> Vec<Arc<CatalogPage>> {
        let mut pages: Vec<_> = self.pages.values().cloned().collect();
        pages.sort_by_key(|page| page.id());
        pages
    }

    /// Ranked folders and pages whose titles match `query`.
    pub fn search(&self, query: &str) -> Vec<Node> {
        self.search_hits(query)
            .into_iter()
            .map(|hit| hit.node)
            .collect()
    }

    /// Like [`search`](Self::search), keeping the scores.
    ///
    /// Folders and pages are ranked together purely by score; equal scores
    /// fall back to title order so results are stable between runs.
    pub fn search_hits(&self, query: &str) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut matcher = FuzzyMatcher::new(query);
        let mut best: HashMap<NodeId, SearchHit> = HashMap::new();

        let candidates = self
            .folders
            .values()
            .map(|entry| Node::Folder(Arc::clone(&entry.folder)))
            .chain(self.pages.values().map(|page| Node::Page(Arc::clone(page))));

        for node in candidates {
            let score = matcher.score(node.title());
            if score <= 0.0 {
                continue;
            }
            let id = node.id();
            match best.get_mut(&id) {
                Some(existing) if existing.score >= score => {}
                Some(existing) => existing.score = score,
                None => {
                    best.insert(id, SearchHit { node, score });
                }
            }
        }

        let mut hits: Vec<SearchHit> = best.into_values().collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.node.title().cmp(b.node.title()))
        });

        debug!(query, hit_count = hits.len(), "Search complete");
        hits
    }
}
