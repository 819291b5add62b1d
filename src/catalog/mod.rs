//! Catalog primitives
//!
//! - [`IdAllocator`] / [`DeclarationIdentifier`] - page identity
//! - [`CatalogPage`] - a leaf with a [`Renderer`]
//! - [`CatalogFolder`] / [`Node`] - the navigable tree
//! - [`View`] - what `render()` hands to the presentation layer

mod declaration;
mod folder;
mod page;
mod view;

pub use declaration::{DeclarationIdentifier, IdAllocator};
pub use folder::{CatalogFolder, Node, NodeId};
pub use page::{CatalogPage, Renderer};
pub use view::{Affordance, Font, HostedKind, TextStyle, Tint, ToolbarPlacement, View};
