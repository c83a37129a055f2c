//! Typed table-of-contents tree

use std::fmt;

/// Position of a node inside its source document, e.g. `toc[2].section[0]`.
///
/// Each element is the child index at that depth; the first element indexes
/// the top-level `toc` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Vec<usize>);

impl Location {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Location of the `index`-th child of this location.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth; top-level entries have depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toc")?;
        for (depth, index) in self.0.iter().enumerate() {
            if depth == 0 {
                write!(f, "[{}]", index)?;
            } else {
                write!(f, ".section[{}]", index)?;
            }
        }
        Ok(())
    }
}

/// Page paths pointing off-site (`http://`, `https://`, protocol-relative `//`).
pub fn is_external_path(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// What a node is: a link to a page, or a grouping of further nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Page { path: String },
    Section { children: Vec<TocNode> },
}

/// One entry in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub title: String,
    pub kind: NodeKind,
}

impl TocNode {
    pub fn page(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: NodeKind::Page { path: path.into() },
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<TocNode>) -> Self {
        Self {
            title: title.into(),
            kind: NodeKind::Section { children },
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self.kind, NodeKind::Page { .. })
    }

    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Page { path } => Some(path),
            NodeKind::Section { .. } => None,
        }
    }

    /// Children of a section; pages have none.
    pub fn children(&self) -> &[TocNode] {
        match &self.kind {
            NodeKind::Page { .. } => &[],
            NodeKind::Section { children } => children,
        }
    }

    fn count(&self) -> usize {
        1 + self.children().iter().map(TocNode::count).sum::<usize>()
    }
}

/// A complete navigation tree as authored in a ToC file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocDocument {
    pub toc: Vec<TocNode>,
}

impl TocDocument {
    pub fn new(toc: Vec<TocNode>) -> Self {
        Self { toc }
    }

    /// Total number of nodes, pages and sections alike.
    pub fn len(&self) -> usize {
        self.toc.iter().map(TocNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.toc.is_empty()
    }

    /// Depth-first walk in authoring order, yielding each node with its location.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.toc)
    }

    /// Page nodes only, in authoring order.
    pub fn pages(&self) -> impl Iterator<Item = (Location, &TocNode)> {
        self.walk().filter(|(_, node)| node.is_page())
    }
}

/// Pre-order iterator over a node list.
pub struct Walk<'a> {
    stack: Vec<(Location, &'a TocNode)>,
}

impl<'a> Walk<'a> {
    fn new(nodes: &'a [TocNode]) -> Self {
        let root = Location::root();
        let stack = nodes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (root.child(i), node))
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Location, &'a TocNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (location, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for (i, child) in node.children().iter().enumerate().rev() {
            self.stack.push((location.child(i), child));
        }
        Some((location, node))
    }
}
