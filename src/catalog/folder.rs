use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use super::declaration::DeclarationIdentifier;
use super::page::CatalogPage;

/// Identity of a catalog node, used to deduplicate search hits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Folder { id: Uuid, title: String },
    Page(DeclarationIdentifier),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Folder { id, title } => write!(f, "{id}{title}"),
            NodeId::Page(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Folder(Arc<CatalogFolder>),
    Page(Arc<CatalogPage>),
}

impl Node {
    pub fn title(&self) -> &str {
        match self {
            Node::Folder(folder) => folder.title(),
            Node::Page(page) => page.title(),
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::Folder(folder) => NodeId::Folder {
                id: folder.id,
                title: folder.title.clone(),
            },
            Node::Page(page) => NodeId::Page(page.id()),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    pub fn as_page(&self) -> Option<&Arc<CatalogPage>> {
        match self {
            Node::Page(page) => Some(page),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Arc<CatalogFolder>> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Page(_) => None,
        }
    }
}

impl From<CatalogFolder> for Node {
    fn from(folder: CatalogFolder) -> Self {
        Node::Folder(Arc::new(folder))
    }
}

impl From<CatalogPage> for Node {
    fn from(page: CatalogPage) -> Self {
        Node::Page(Arc::new(page))
    }
}

/// Folders first, then pages; each group ordered by title.
fn catalog_order(a: &Node, b: &Node) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.title().cmp(b.title()),
    }
}

/// A titled group of nodes.
///
/// Children are sorted at construction and never change afterwards, so every
/// folder in a tree satisfies the folders-before-pages ordering.
#[derive(Debug)]
pub struct CatalogFolder {
    id: Uuid,
    title: String,
    children: Vec<Node>,
}

impl CatalogFolder {
    pub fn new(title: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        let mut children: Vec<Node> = children.into_iter().collect();
        // stable sort keeps insertion order among equal titles
        children.sort_by(catalog_order);
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            children,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Every page below this folder, depth first in display order.
    pub fn all_pages(&self) -> Vec<Arc<CatalogPage>> {
        let mut pages = Vec::new();
        self.collect_pages(&mut pages);
        pages
    }

    fn collect_pages(&self, out: &mut Vec<Arc<CatalogPage>>) {
        for child in &self.children {
            match child {
                Node::Folder(folder) => folder.collect_pages(out),
                Node::Page(page) => out.push(Arc::clone(page)),
            }
        }
    }

    /// Every folder below this one (not including itself), depth first.
    pub fn all_folders(&self) -> Vec<Arc<CatalogFolder>> {
        let mut folders = Vec::new();
        self.collect_folders(&mut folders);
        folders
    }

    fn collect_folders(&self, out: &mut Vec<Arc<CatalogFolder>>) {
        for child in &self.children {
            if let Node::Folder(folder) = child {
                out.push(Arc::clone(folder));
                folder.collect_folders(out);
            }
        }
    }

    /// Total node count below this folder.
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Folder(folder) => 1 + folder.node_count(),
                Node::Page(_) => 1,
            })
            .sum()
    }
}
