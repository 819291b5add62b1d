//! Catalog tree builder
//!
//! Groups adapted previews into `module -> file -> pages` folders.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{CatalogFolder, CatalogPage, IdAllocator, Node};

use super::adapter::AdaptedPreview;

/// File name shown for a preview file: the file id without its module prefix.
pub fn file_display_name<'a>(module: &str, file_id: &'a str) -> &'a str {
    file_id
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(file_id)
}

/// Build one folder per module, each holding one folder per file.
///
/// Pages get identifiers in adapter order (module, then line), which keeps
/// them stable across launches as long as the set of previews is unchanged.
pub fn build_preview_tree(allocator: &IdAllocator, mut previews: Vec<AdaptedPreview>) -> Vec<Node> {
    previews.sort();

    let mut modules: BTreeMap<String, BTreeMap<String, Vec<Node>>> = BTreeMap::new();
    for preview in previews {
        let title = preview.display_title();
        let page = CatalogPage::new(
            allocator,
            preview.file_id.clone(),
            preview.line,
            title,
            preview.renderer,
        );
        modules
            .entry(preview.module)
            .or_default()
            .entry(preview.file_id)
            .or_default()
            .push(page.into());
    }

    debug!(module_count = modules.len(), "Built preview tree");

    modules
        .into_iter()
        .map(|(module, files)| {
            let file_folders: Vec<Node> = files
                .into_iter()
                .map(|(file_id, pages)| {
                    CatalogFolder::new(file_display_name(&module, &file_id), pages).into()
                })
                .collect();
            CatalogFolder::new(module, file_folders).into()
        })
        .collect()
}
