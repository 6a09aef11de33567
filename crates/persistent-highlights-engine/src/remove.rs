//! Unwrapping annotation markers.

use std::cmp::Ordering;

use crate::tree::{DocumentTree, NodeId, TreeRange};

/// Unwrap every marker under `root` whose span touches `range`.
///
/// A marker overlaps when it starts at or before the range's end and ends at
/// or after the range's start. Unwrapping is purely structural: the marker's
/// children move into its parent at its former position.
pub fn remove_overlapping(tree: &mut DocumentTree, root: NodeId, range: &TreeRange) -> usize {
    let overlapping: Vec<NodeId> = tree
        .markers(root)
        .into_iter()
        .filter(|&marker| overlaps(tree, marker, range))
        .collect();
    unwrap_all(tree, &overlapping)
}

/// Unwrap every marker under `root`, regardless of position.
pub fn strip_markers(tree: &mut DocumentTree, root: NodeId) -> usize {
    let markers = tree.markers(root);
    unwrap_all(tree, &markers)
}

fn overlaps(tree: &DocumentTree, marker: NodeId, range: &TreeRange) -> bool {
    let Some(span) = TreeRange::select_node(tree, marker) else {
        return false;
    };
    tree.compare_positions(range.start, span.end) != Ordering::Greater
        && tree.compare_positions(range.end, span.start) != Ordering::Less
}

fn unwrap_all(tree: &mut DocumentTree, markers: &[NodeId]) -> usize {
    let mut removed = 0;
    for &marker in markers {
        match tree.unwrap_marker(marker) {
            Ok(()) => removed += 1,
            Err(err) => log::warn!("Failed to unwrap marker {marker:?}: {err}"),
        }
    }
    removed
}
