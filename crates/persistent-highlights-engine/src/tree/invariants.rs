use super::{DocumentTree, NodeId};

/// Validates structural invariants of a tree.
///
/// Asserts that:
/// - Every child's parent link points back at the node listing it
/// - Text leaves have no children
/// - Markers are non-empty, wrap only text, and never nest
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(tree: &DocumentTree) {
    for node in tree.descendants(tree.root()) {
        for &child in tree.children(node) {
            assert_eq!(
                tree.parent(child),
                Some(node),
                "child {child:?} listed under {node:?} but points at {:?}",
                tree.parent(child)
            );
        }
        if tree.is_text(node) {
            assert!(
                tree.children(node).is_empty(),
                "text leaf {node:?} has children"
            );
        }
        if tree.is_marker(node) {
            check_marker(tree, node);
        }
    }
}

fn check_marker(tree: &DocumentTree, marker: NodeId) {
    assert!(
        !tree.children(marker).is_empty(),
        "marker {marker:?} wraps nothing"
    );
    assert!(
        tree.children(marker).iter().all(|&c| tree.is_text(c)),
        "marker {marker:?} wraps a non-text node"
    );
    assert!(
        !tree.inside_marker(marker),
        "marker {marker:?} is nested inside another marker"
    );
}
