use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::node::{Location, TocDocument, TocNode};

/// Data payload for tree nodes representing ToC entries.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Display label
    pub title: String,
    /// Page route, None for sections and the synthetic root
    pub path: Option<String>,
    /// Position in the source document
    pub location: Location,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({})", self.title, path),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in authoring order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_page(&self) -> bool {
        self.data.path.is_some()
    }
}

/// Arena-based index over a ToC document.
///
/// The root is synthetic (empty title, root location) so that all top-level
/// entries hang off a single tree. Traversals skip it.
#[derive(Debug)]
pub struct TocArena {
    arena: Arena<TreeNode>,
    root: Index,
}

impl TocArena {
    #[instrument(level = "debug", skip_all, fields(nodes = doc.len()))]
    pub fn from_document(doc: &TocDocument) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData {
                title: String::new(),
                path: None,
                location: Location::root(),
            },
            parent: None,
            children: Vec::new(),
        });
        let mut tree = Self { arena, root };

        let mut stack: Vec<(&TocNode, Location, Index)> = doc
            .toc
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (node, Location::root().child(i), root))
            .collect();

        while let Some((node, location, parent_idx)) = stack.pop() {
            let data = NodeData {
                title: node.title.clone(),
                path: node.path().map(str::to_string),
                location: location.clone(),
            };
            let idx = tree.insert_node(data, parent_idx);

            for (i, child) in node.children().iter().enumerate().rev() {
                stack.push((child, location.child(i), idx));
            }
        }

        tree
    }

    fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of ToC entries, excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-order traversal (authoring order), root excluded.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Post-order traversal, root excluded.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Longest chain of nested entries; top-level pages count as 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root).saturating_sub(1)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the paths of all page nodes in authoring order.
    ///
    /// Empty sections have no children but are not pages, so they are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(_, node)| node.data.path.clone())
            .collect()
    }

    /// First page with the given path.
    pub fn find_by_path(&self, path: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.data.path.as_deref() == Some(path))
            .map(|(idx, _)| idx)
    }

    /// Indices from the node's parent up to (excluding) the synthetic root.
    pub fn ancestors(&self, idx: Index) -> Vec<Index> {
        let mut result = Vec::new();
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(parent_idx) = current {
            if parent_idx == self.root {
                break;
            }
            result.push(parent_idx);
            current = self.get_node(parent_idx).and_then(|n| n.parent);
        }
        result
    }

    /// Titles from the top-level entry down to the node itself.
    pub fn breadcrumbs(&self, idx: Index) -> Vec<String> {
        let mut trail: Vec<String> = self
            .ancestors(idx)
            .into_iter()
            .rev()
            .filter_map(|i| self.get_node(i).map(|n| n.data.title.clone()))
            .collect();
        if let Some(node) = self.get_node(idx) {
            trail.push(node.data.title.clone());
        }
        trail
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TocArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TocArena) -> Self {
        let stack = arena
            .get_node(arena.root)
            .map(|root| root.children.iter().rev().copied().collect())
            .unwrap_or_default();
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TocArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TocArena) -> Self {
        let stack = arena
            .get_node(arena.root)
            .map(|root| root.children.iter().rev().map(|&c| (c, false)).collect())
            .unwrap_or_default();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
