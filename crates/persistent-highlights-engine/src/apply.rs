//! Wrapping a tree range in annotation markers.
//!
//! Markers are containers, so a range that crosses several leaves cannot be
//! wrapped by a single one without re-parenting unrelated structure. Instead
//! each covered leaf gets its own marker, all sharing the highlight id and
//! color; leaves already inside a marker are left alone so markers never nest.

use crate::tree::{DocumentTree, NodeId, Position, TreeRange};

/// Wrap the text covered by `range` in markers tagged `id`/`color`.
///
/// Returns the created markers in document order. A leaf whose wrap fails is
/// logged and skipped; the remaining leaves are still marked.
pub fn apply_highlight(
    tree: &mut DocumentTree,
    range: &TreeRange,
    color: &str,
    id: &str,
) -> Vec<NodeId> {
    let (start, end) = (range.start, range.end);

    if start.node == end.node && tree.is_text(start.node) && !tree.inside_marker(start.node) {
        if start.offset == end.offset {
            return Vec::new();
        }
        match tree.wrap_text(start.node, start.offset, end.offset, id, color) {
            Ok(marker) => return vec![marker],
            Err(err) => log::warn!("Failed to wrap highlight {id} in a single leaf: {err}"),
        }
    }

    let Some(ancestor) = range.common_ancestor(tree) else {
        log::warn!("Highlight {id} spans nodes with no common ancestor");
        return Vec::new();
    };

    let spans: Vec<(NodeId, usize, usize)> = tree
        .leaves(ancestor)
        .filter(|&leaf| !tree.inside_marker(leaf))
        .filter_map(|leaf| clip_to_range(tree, leaf, range).map(|(s, e)| (leaf, s, e)))
        .collect();

    let mut markers = Vec::with_capacity(spans.len());
    for (leaf, local_start, local_end) in spans {
        match tree.wrap_text(leaf, local_start, local_end, id, color) {
            Ok(marker) => markers.push(marker),
            Err(err) => log::warn!("Failed to wrap highlight {id} in leaf {leaf:?}: {err}"),
        }
    }
    markers
}

/// Local `[start, end)` of the part of `leaf` inside `range`, if non-empty.
fn clip_to_range(tree: &DocumentTree, leaf: NodeId, range: &TreeRange) -> Option<(usize, usize)> {
    let len = tree.text_len(leaf);
    let leaf_start = Position::new(leaf, 0);
    let leaf_end = Position::new(leaf, len);

    let local_start = if leaf == range.start.node {
        range.start.offset
    } else if tree.compare_positions(leaf_start, range.start).is_ge() {
        0
    } else {
        len
    };
    let local_end = if leaf == range.end.node {
        range.end.offset
    } else if tree.compare_positions(leaf_end, range.end).is_le() {
        len
    } else {
        0
    };

    (local_start < local_end).then_some((local_start, local_end))
}
