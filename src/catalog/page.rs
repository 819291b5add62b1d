use std::fmt;
use std::sync::Arc;

use super::declaration::{DeclarationIdentifier, IdAllocator};
use super::view::View;

/// Produces the destination view of a page on demand.
pub type Renderer = Arc<dyn Fn() -> View + Send + Sync>;

/// A leaf of the catalog: one renderable example.
///
/// Pages are immutable once built and are shared (`Arc`) between the tree,
/// the flattened index and any in-flight search.
pub struct CatalogPage {
    id: DeclarationIdentifier,
    title: String,
    file_id: String,
    line: u32,
    uses_scroll_view: bool,
    renderer: Renderer,
}

impl CatalogPage {
    pub fn new(
        allocator: &IdAllocator,
        file_id: impl Into<String>,
        line: u32,
        title: impl Into<String>,
        renderer: Renderer,
    ) -> Self {
        Self {
            id: allocator.next(),
            title: title.into(),
            file_id: file_id.into(),
            line,
            uses_scroll_view: true,
            renderer,
        }
    }

    /// Convenience constructor for authored pages with a plain closure.
    pub fn with_destination<F>(
        allocator: &IdAllocator,
        file_id: impl Into<String>,
        line: u32,
        title: impl Into<String>,
        destination: F,
    ) -> Self
    where
        F: Fn() -> View + Send + Sync + 'static,
    {
        Self::new(allocator, file_id, line, title, Arc::new(destination))
    }

    /// Render the destination without a scroll container.
    pub fn without_scroll_view(mut self) -> Self {
        self.uses_scroll_view = false;
        self
    }

    pub fn id(&self) -> DeclarationIdentifier {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn uses_scroll_view(&self) -> bool {
        self.uses_scroll_view
    }

    /// `"{file_id}:{line}"`, shown under the title in lists.
    pub fn source_label(&self) -> String {
        format!("{}:{}", self.file_id, self.line)
    }

    pub fn render(&self) -> View {
        let destination = (self.renderer)();
        if self.uses_scroll_view {
            View::Scroll(Box::new(destination))
        } else {
            destination
        }
    }
}

impl fmt::Debug for CatalogPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogPage")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("file_id", &self.file_id)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}
