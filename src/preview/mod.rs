//! Preview discovery and adaptation
//!
//! Data flow: [`PreviewDescriptor`] -> [`adapt`] -> [`AdaptedPreview`] ->
//! [`build_preview_tree`] -> catalog nodes.

mod adapter;
mod descriptor;
mod registry;
pub mod schema;
mod tree;

pub use adapter::{adapt, adapt_all, source_footer, AdaptedPreview};
pub use descriptor::{Field, MakePreview, PreviewDescriptor, Record, ViewFactory};
pub use registry::{registered_previews, PreviewRegistration};
pub use tree::{build_preview_tree, file_display_name};
