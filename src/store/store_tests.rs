use super::*;
use crate::catalog::{IdAllocator, View};
use serde_json::json;

fn page(allocator: &IdAllocator, title: &str) -> Node {
    CatalogPage::with_destination(allocator, "App/Pages.rs", 1, title, || View::Empty).into()
}

fn catalog(allocator: &IdAllocator, titles: &[&str]) -> Arc<CatalogFolder> {
    Arc::new(CatalogFolder::new(
        "Storybook",
        titles.iter().map(|title| page(allocator, title)),
    ))
}

fn ids_of(store: &CatalogStore, titles: &[&str]) -> Vec<DeclarationIdentifier> {
    titles
        .iter()
        .map(|title| {
            store
                .index()
                .pages_by_id()
                .iter()
                .find(|p| p.title() == *title)
                .map(|p| p.id())
                .unwrap()
        })
        .collect()
}

#[test]
fn test_reopen_moves_page_to_front() {
    let allocator = IdAllocator::new();
    let store_backend = Arc::new(MemoryStore::new());
    let mut store = CatalogStore::new(catalog(&allocator, &["A", "B"]), store_backend.clone());
    let ab = ids_of(&store, &["A", "B"]);
    let (a, b) = (ab[0], ab[1]);

    store.record_open(a);
    store.record_open(b);
    store.record_open(a);

    assert_eq!(store.history_ids(), vec![a, b]);
    assert_eq!(
        store_backend.get(HISTORY_KEY).unwrap(),
        Some(json!([a.index(), b.index()]))
    );
}

#[test]
fn test_history_keeps_five_most_recent() {
    let allocator = IdAllocator::new();
    let titles = ["1", "2", "3", "4", "5", "6", "7"];
    let mut store = CatalogStore::new(catalog(&allocator, &titles), Arc::new(MemoryStore::new()));
    let ids = ids_of(&store, &titles);

    for id in &ids {
        store.record_open(*id);
    }

    let expected: Vec<_> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(store.history_ids(), expected);
    assert_eq!(store.history_pages().len(), DEFAULT_HISTORY_LIMIT);
}

#[test]
fn test_custom_history_limit() {
    let allocator = IdAllocator::new();
    let titles = ["1", "2", "3"];
    let mut store = CatalogStore::new(catalog(&allocator, &titles), Arc::new(MemoryStore::new()))
        .with_history_limit(2);
    for id in ids_of(&store, &titles) {
        store.record_open(id);
    }
    assert_eq!(store.history_ids().len(), 2);
}

#[test]
fn test_history_limit_applies_to_persisted_history() {
    let allocator = IdAllocator::new();
    let titles = ["1", "2", "3", "4", "5"];
    let root = catalog(&allocator, &titles);
    let backend = Arc::new(MemoryStore::new());
    let lookup = CatalogStore::new(Arc::clone(&root), Arc::new(MemoryStore::new()));
    let ids = ids_of(&lookup, &titles);
    let stored: Vec<_> = ids.iter().rev().map(|id| id.index()).collect();
    backend.set(HISTORY_KEY, json!(stored)).unwrap();

    let store = CatalogStore::new(root, backend).with_history_limit(2);

    assert_eq!(store.history_pages().len(), 2);
    assert_eq!(store.history_ids(), vec![ids[4], ids[3]]);
}

#[test]
fn test_operator_characters_search_literally() {
    let allocator = IdAllocator::new();
    let store = CatalogStore::new(
        catalog(&allocator, &["Button Preview", "Card"]),
        Arc::new(MemoryStore::new()),
    );
    assert!(store.search("!zzz").is_empty());
    assert!(store.search("^view").is_empty());
    assert_eq!(store.search("view").len(), 1);
}

#[test]
fn test_stale_ids_dropped_on_construction() {
    let allocator = IdAllocator::new();
    let root = catalog(&allocator, &["Only"]);
    let only = root.all_pages()[0].id();

    let backend = Arc::new(MemoryStore::new());
    backend
        .set(HISTORY_KEY, json!([9_999, only.index(), 12_345]))
        .unwrap();

    let store = CatalogStore::new(root, backend);
    assert_eq!(store.history_ids(), vec![only]);
}

#[test]
fn test_open_unknown_page_is_noop() {
    let allocator = IdAllocator::new();
    let backend = Arc::new(MemoryStore::new());
    let mut store = CatalogStore::new(catalog(&allocator, &["A"]), backend.clone());

    store.record_open(DeclarationIdentifier::from_raw(424_242));

    assert!(store.history_pages().is_empty());
    assert_eq!(backend.get(HISTORY_KEY).unwrap(), None);
}

#[test]
fn test_history_survives_reopen_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storybook.json");
    let allocator = IdAllocator::new();
    let root = catalog(&allocator, &["A", "B"]);

    let opened = {
        let mut store = CatalogStore::new(
            Arc::clone(&root),
            Arc::new(JsonFileStore::open(&path)),
        );
        let ids = ids_of(&store, &["B"]);
        store.record_open(ids[0]);
        ids[0]
    };

    let store = CatalogStore::new(root, Arc::new(JsonFileStore::open(&path)));
    assert_eq!(store.history_ids(), vec![opened]);
}

#[test]
fn test_search_returns_folder_and_page_ranked_by_score() {
    let allocator = IdAllocator::new();
    let root = Arc::new(CatalogFolder::new(
        "Storybook",
        vec![
            CatalogFolder::new("Card", vec![page(&allocator, "Plain")]).into(),
            page(&allocator, "Profile Card"),
        ],
    ));
    let store = CatalogStore::new(root, Arc::new(MemoryStore::new()));

    let hits = store.index().search_hits("card");
    assert_eq!(hits.len(), 2);
    let titles: Vec<_> = hits.iter().map(|hit| hit.node.title()).collect();
    assert_eq!(titles, vec!["Card", "Profile Card"]);
    assert!(hits[0].score > hits[1].score);

    let nodes = store.search("card");
    assert_eq!(nodes.len(), 2);
    assert!(store.search("").is_empty());
}

#[test]
fn test_page_folder_order_follows_score_not_kind() {
    let allocator = IdAllocator::new();
    let root = Arc::new(CatalogFolder::new(
        "Storybook",
        vec![
            CatalogFolder::new("Settings Card", Vec::new()).into(),
            page(&allocator, "Card"),
        ],
    ));
    let store = CatalogStore::new(root, Arc::new(MemoryStore::new()));

    let nodes = store.search("card");
    assert_eq!(nodes.len(), 2);
    // the page is a prefix match, so it outranks the folder
    assert!(!nodes[0].is_folder());
    assert!(nodes[1].is_folder());
}
