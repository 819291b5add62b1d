//! Storybook catalog - a searchable, navigable catalog of UI previews
//!
//! Host-discovered preview descriptors are adapted into renderable pages,
//! grouped by module and file, and merged with hand-written pages into one
//! tree. The store flattens that tree for lookup and fuzzy search and keeps a
//! short persisted history of opened pages.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod preview;
pub mod search;
pub mod store;
pub mod storybook;

pub use catalog::{CatalogFolder, CatalogPage, DeclarationIdentifier, IdAllocator, Node, View};
pub use storybook::Storybook;

// Used by `register_preview!`
#[doc(hidden)]
pub use inventory;
