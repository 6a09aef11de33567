use std::cmp::Ordering;

use super::{DocumentTree, NodeId};

/// A point in the tree.
///
/// For a text leaf `offset` counts chars into its text; for a container it is
/// a child index, `children.len()` meaning "after the last child".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Ordered pair of positions delimiting a stretch of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRange {
    pub start: Position,
    pub end: Position,
}

impl TreeRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range between two points given in either order (anchor/focus of a
    /// backwards drag, for instance).
    pub fn ordered(tree: &DocumentTree, a: Position, b: Position) -> Self {
        match tree.compare_positions(a, b) {
            Ordering::Greater => Self::new(b, a),
            _ => Self::new(a, b),
        }
    }

    /// Range spanning exactly `node`: from just before it to just after it,
    /// expressed in its parent's child indices.
    pub fn select_node(tree: &DocumentTree, node: NodeId) -> Option<Self> {
        let parent = tree.parent(node)?;
        let index = tree.index_in_parent(node)?;
        Some(Self::new(
            Position::new(parent, index),
            Position::new(parent, index + 1),
        ))
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn common_ancestor(&self, tree: &DocumentTree) -> Option<NodeId> {
        tree.common_ancestor(self.start.node, self.end.node)
    }

    /// Both ends sit in attached text leaves.
    ///
    /// Leaf ids survive marker wrap/unwrap, so such a range stays meaningful
    /// across those edits; container-relative child indices do not.
    pub fn is_leaf_anchored(&self, tree: &DocumentTree) -> bool {
        [self.start.node, self.end.node]
            .into_iter()
            .all(|node| tree.is_text(node) && tree.is_attached(node))
    }
}

/// Sort key of a boundary point: the node's path with the offset appended.
pub(crate) fn boundary_key(tree: &DocumentTree, position: Position) -> Vec<usize> {
    let mut key = tree.path(position.node);
    key.push(position.offset);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    fn two_paragraphs() -> (DocumentTree, Vec<NodeId>) {
        let mut b = TreeBuilder::new("div", Some("c"));
        b.element("p", "first").element("p", "second");
        let tree = b.finish();
        let leaves = tree.leaves(tree.root()).collect();
        (tree, leaves)
    }

    #[test]
    fn test_positions_within_a_leaf_order_by_offset() {
        let (tree, leaves) = two_paragraphs();
        let a = Position::new(leaves[0], 1);
        let b = Position::new(leaves[0], 3);

        assert_eq!(tree.compare_positions(a, b), Ordering::Less);
        assert_eq!(tree.compare_positions(b, a), Ordering::Greater);
        assert_eq!(tree.compare_positions(a, a), Ordering::Equal);
    }

    #[test]
    fn test_container_point_sorts_between_children() {
        let (tree, leaves) = two_paragraphs();
        let root = tree.root();
        let end_of_first = Position::new(leaves[0], 5);
        let between = Position::new(root, 1);
        let start_of_second = Position::new(leaves[1], 0);

        assert_eq!(
            tree.compare_positions(end_of_first, between),
            Ordering::Less
        );
        assert_eq!(
            tree.compare_positions(between, start_of_second),
            Ordering::Less
        );
    }

    #[test]
    fn test_ordered_swaps_backwards_ranges() {
        let (tree, leaves) = two_paragraphs();
        let focus = Position::new(leaves[0], 2);
        let anchor = Position::new(leaves[1], 4);

        let range = TreeRange::ordered(&tree, anchor, focus);

        assert_eq!(range.start, focus);
        assert_eq!(range.end, anchor);
    }

    #[test]
    fn test_select_node_brackets_the_node() {
        let (tree, leaves) = two_paragraphs();
        let second_p = tree.parent(leaves[1]).unwrap();

        let range = TreeRange::select_node(&tree, second_p).unwrap();

        assert_eq!(range.start, Position::new(tree.root(), 1));
        assert_eq!(range.end, Position::new(tree.root(), 2));
        assert_eq!(TreeRange::select_node(&tree, tree.root()), None);
    }

    #[test]
    fn test_leaf_anchored() {
        let (tree, leaves) = two_paragraphs();
        let leafy = TreeRange::new(Position::new(leaves[0], 0), Position::new(leaves[1], 2));
        let containerish = TreeRange::new(Position::new(tree.root(), 0), Position::new(leaves[1], 2));

        assert!(leafy.is_leaf_anchored(&tree));
        assert!(!containerish.is_leaf_anchored(&tree));
    }
}
