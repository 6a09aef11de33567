//! # Document Tree
//!
//! An ordered tree of text-bearing leaves and containers, stored in an arena
//! and addressed by [`NodeId`].
//!
//! ## Node kinds
//!
//! - **`Text`**: a leaf holding literal text. The concatenation of all text
//!   leaves under a node, in pre-order, is that node's *linear text*.
//! - **`Element`**: a plain container (heading, paragraph, list item, ...)
//!   with an optional `id` attribute used to address content containers.
//! - **`Marker`**: an annotation container tagging the text it wraps with a
//!   highlight id and a color. Markers never nest.
//!
//! ## Structural edits
//!
//! Content is otherwise immutable; the only mutations are the two the
//! highlight engine needs:
//!
//! - [`DocumentTree::wrap_text`] splits a leaf at the span boundaries and
//!   wraps the middle part in a new marker
//! - [`DocumentTree::unwrap_marker`] moves a marker's children back into its
//!   parent and discards the marker
//!
//! Neither creates, copies, or deletes text, so linear offsets computed before
//! an edit stay valid after it.

pub mod builder;
pub mod invariants;
pub mod range;

pub use builder::TreeBuilder;
pub use range::{Position, TreeRange};

use std::cmp::Ordering;

/// Index of a node in its [`DocumentTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf with literal text content
    Text(String),
    /// Plain container element
    Element { tag: String, id: Option<String> },
    /// Annotation marker wrapping highlighted text
    Marker { highlight_id: String, color: String },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Failures of the structural edit primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {0:?} is not a text leaf")]
    NotText(NodeId),
    #[error("node {0:?} is not a marker")]
    NotMarker(NodeId),
    #[error("node {0:?} is not a container")]
    NotContainer(NodeId),
    #[error("node {0:?} has no parent")]
    Detached(NodeId),
    #[error("span {start}..{end} is out of bounds for text of length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("span {start}..{end} is empty")]
    EmptySpan { start: usize, end: usize },
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
    /// Slots of discarded markers, reused by later allocations
    free: Vec<NodeId>,
    root: NodeId,
}

impl DocumentTree {
    /// Create a tree containing only a root element
    pub fn new(tag: &str, id: Option<&str>) -> Self {
        let root = NodeData {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                id: id.map(str::to_string),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Text(_))
    }

    pub fn is_marker(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Marker { .. })
    }

    /// Text of a leaf, `None` for containers
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Length of a leaf's text in chars; containers have length 0.
    pub fn text_len(&self, node: NodeId) -> usize {
        self.text(node).map_or(0, |text| text.chars().count())
    }

    /// Highlight id and color of a marker
    pub fn marker_info(&self, node: NodeId) -> Option<(&str, &str)> {
        match self.kind(node) {
            NodeKind::Marker {
                highlight_id,
                color,
            } => Some((highlight_id, color)),
            _ => None,
        }
    }

    /// Pre-order traversal of `node` and everything below it.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![node],
        }
    }

    /// Text leaves under `node` in document order.
    pub fn leaves(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(node).filter(move |&n| self.is_text(n))
    }

    pub fn first_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.leaves(node).next()
    }

    pub fn last_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.leaves(node).last()
    }

    /// Linear text of `node`
    pub fn text_content(&self, node: NodeId) -> String {
        self.leaves(node)
            .filter_map(|leaf| self.text(leaf))
            .collect()
    }

    /// All markers under `node` in document order.
    pub fn markers(&self, node: NodeId) -> Vec<NodeId> {
        self.descendants(node)
            .filter(|&n| self.is_marker(n))
            .collect()
    }

    /// Markers under `node` carrying the given highlight id.
    pub fn markers_for(&self, node: NodeId, highlight_id: &str) -> Vec<NodeId> {
        self.markers(node)
            .into_iter()
            .filter(|&m| matches!(self.marker_info(m), Some((id, _)) if id == highlight_id))
            .collect()
    }

    /// Parent chain of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Whether any ancestor of `node` is a marker.
    pub fn inside_marker(&self, node: NodeId) -> bool {
        self.ancestors(node).any(|a| self.is_marker(a))
    }

    /// Deepest node containing both `a` and `b`, if they share one.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain_a: Vec<NodeId> = std::iter::once(a).chain(self.ancestors(a)).collect();
        std::iter::once(b)
            .chain(self.ancestors(b))
            .find(|candidate| chain_a.contains(candidate))
    }

    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Child indices leading from the root (or the topmost detached ancestor)
    /// down to `node`.
    pub fn path(&self, node: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            if let Some(index) = self.index_in_parent(current) {
                path.push(index);
            }
            current = parent;
        }
        path.reverse();
        path
    }

    /// Document-order comparison of two boundary points.
    ///
    /// A point is keyed by its node's path with the local offset appended, so
    /// `(parent, i)` sorts before anything inside child `i` and after
    /// everything inside child `i - 1`.
    pub fn compare_positions(&self, a: Position, b: Position) -> Ordering {
        range::boundary_key(self, a).cmp(&range::boundary_key(self, b))
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root).find(|&n| {
            matches!(self.kind(n), NodeKind::Element { id: Some(element_id), .. } if element_id == id)
        })
    }

    /// Append a text leaf to a container
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, TreeError> {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    /// Append a plain element to a container
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
    ) -> Result<NodeId, TreeError> {
        self.append(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                id: id.map(str::to_string),
            },
        )
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        if self.is_text(parent) {
            return Err(TreeError::NotContainer(parent));
        }
        Ok(self.push_child(parent, kind))
    }

    /// Append without checking that `parent` is a container.
    pub(crate) fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let node = self.alloc(kind, Some(parent));
        self.nodes[parent.0].children.push(node);
        node
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let data = NodeData {
            kind,
            parent,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = data;
                slot
            }
            None => {
                self.nodes.push(data);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Split a text leaf at char offset `at`.
    ///
    /// The leaf keeps `[0, at)`; a new sibling inserted right after it takes
    /// `[at, len)`. Returns the new sibling.
    pub fn split_text(&mut self, leaf: NodeId, at: usize) -> Result<NodeId, TreeError> {
        let text = self.text(leaf).ok_or(TreeError::NotText(leaf))?;
        let len = text.chars().count();
        if at > len {
            return Err(TreeError::SpanOutOfBounds {
                start: at,
                end: at,
                len,
            });
        }
        let parent = self.parent(leaf).ok_or(TreeError::Detached(leaf))?;
        let index = self.index_in_parent(leaf).ok_or(TreeError::Detached(leaf))?;

        let split = byte_index(text, at);
        let tail = text[split..].to_string();
        let head = text[..split].to_string();

        self.nodes[leaf.0].kind = NodeKind::Text(head);
        let sibling = self.alloc(NodeKind::Text(tail), Some(parent));
        self.nodes[parent.0].children.insert(index + 1, sibling);
        Ok(sibling)
    }

    /// Wrap chars `[start, end)` of a text leaf in a new marker.
    ///
    /// The leaf is split only where the span does not already reach its edges,
    /// so wrapping a whole leaf creates no new text nodes.
    pub fn wrap_text(
        &mut self,
        leaf: NodeId,
        start: usize,
        end: usize,
        highlight_id: &str,
        color: &str,
    ) -> Result<NodeId, TreeError> {
        let len = self.text(leaf).ok_or(TreeError::NotText(leaf))?.chars().count();
        if start > end || end > len {
            return Err(TreeError::SpanOutOfBounds { start, end, len });
        }
        if start == end {
            return Err(TreeError::EmptySpan { start, end });
        }
        if self.parent(leaf).is_none() {
            return Err(TreeError::Detached(leaf));
        }

        if end < len {
            self.split_text(leaf, end)?;
        }
        let target = if start > 0 {
            self.split_text(leaf, start)?
        } else {
            leaf
        };

        let parent = self.parent(target).ok_or(TreeError::Detached(target))?;
        let index = self
            .index_in_parent(target)
            .ok_or(TreeError::Detached(target))?;
        let marker = self.alloc(
            NodeKind::Marker {
                highlight_id: highlight_id.to_string(),
                color: color.to_string(),
            },
            Some(parent),
        );
        self.nodes[parent.0].children[index] = marker;
        self.nodes[marker.0].children.push(target);
        self.nodes[target.0].parent = Some(marker);
        Ok(marker)
    }

    /// Replace a marker by its children, preserving sibling order.
    pub fn unwrap_marker(&mut self, marker: NodeId) -> Result<(), TreeError> {
        if !self.is_marker(marker) {
            return Err(TreeError::NotMarker(marker));
        }
        let parent = self.parent(marker).ok_or(TreeError::Detached(marker))?;
        let index = self
            .index_in_parent(marker)
            .ok_or(TreeError::Detached(marker))?;

        let children = std::mem::take(&mut self.nodes[marker.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(parent);
        }
        let siblings = &mut self.nodes[parent.0].children;
        siblings.remove(index);
        for (offset, child) in children.into_iter().enumerate() {
            siblings.insert(index + offset, child);
        }

        self.nodes[marker.0].parent = None;
        self.free.push(marker);
        Ok(())
    }
}

/// Pre-order iterator returned by [`DocumentTree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a DocumentTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}

/// Parent-chain iterator returned by [`DocumentTree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.next = self.tree.parent(node);
        Some(node)
    }
}

/// Byte index of the char at `char_offset`, or the string length past the end.
fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(i, _)| i)
}
