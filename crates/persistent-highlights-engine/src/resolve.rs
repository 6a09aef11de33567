//! Tree position → linear offset.

use crate::tree::{DocumentTree, NodeId, Position};

/// Linear char offset of `(node, offset)` within the text of `root`.
///
/// Selection sources may anchor on a container rather than a text leaf; such
/// positions are first moved onto a concrete leaf (see [`concrete_leaf`]).
/// If the node is not found under `root` the total length walked is returned
/// as a best-effort approximation and a warning is logged.
pub fn text_offset(tree: &DocumentTree, root: NodeId, node: NodeId, offset: usize) -> usize {
    let target = concrete_leaf(tree, node, offset).unwrap_or(Position::new(node, offset));

    let mut total = 0;
    for leaf in tree.leaves(root) {
        if leaf == target.node {
            return total + target.offset;
        }
        total += tree.text_len(leaf);
    }

    log::warn!(
        "Could not find node {:?} under {:?}, using approximate offset {}",
        target.node,
        root,
        total
    );
    total
}

/// Move a container-anchored position onto a text leaf.
///
/// - an offset naming a text child resolves to the start of that child
/// - an offset naming a container child resolves to the start of its first leaf
/// - an offset equal to the child count resolves to the end of the last leaf
///
/// Returns `None` when `node` is already a leaf or no leaf can be found.
pub fn concrete_leaf(tree: &DocumentTree, node: NodeId, offset: usize) -> Option<Position> {
    if tree.is_text(node) {
        return None;
    }
    let children = tree.children(node);
    if offset < children.len() {
        let child = children[offset];
        if tree.is_text(child) {
            Some(Position::new(child, 0))
        } else {
            tree.first_leaf(child).map(|leaf| Position::new(leaf, 0))
        }
    } else if offset == children.len() {
        tree.last_leaf(node)
            .map(|leaf| Position::new(leaf, tree.text_len(leaf)))
    } else {
        None
    }
}
