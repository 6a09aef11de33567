//! Rebuilding markers from the persisted highlight list.
//!
//! The persisted list is the source of truth; markers in the tree are a
//! projection of it. Every pass strips all markers and re-derives tree
//! positions from the linear offsets of each highlight, so repeated passes
//! with the same list converge on the same tree.

use crate::apply::apply_highlight;
use crate::highlight::Highlight;
use crate::remove::strip_markers;
use crate::tree::{DocumentTree, NodeId, Position, TreeRange};

/// What a materialize pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Markers unwrapped before re-applying
    pub stripped: usize,
    /// Highlights whose offsets resolved against the current content
    pub applied: usize,
    /// Highlights dropped for this pass: empty, or offsets that did not resolve
    pub skipped: usize,
}

/// Replace all markers under `root` with markers for `highlights`.
///
/// Highlights are applied in list order, each independently. One that is
/// empty or whose offsets fall outside the current text is skipped for this
/// pass only.
pub fn materialize(
    tree: &mut DocumentTree,
    highlights: &[Highlight],
    root: NodeId,
) -> MaterializeSummary {
    let mut summary = MaterializeSummary {
        stripped: strip_markers(tree, root),
        ..MaterializeSummary::default()
    };

    for highlight in highlights {
        let range = if highlight.is_empty() {
            None
        } else {
            find_boundaries(tree, root, highlight.start, highlight.end)
        };
        let Some(range) = range else {
            log::debug!(
                "Skipping highlight {} ({}..{}): empty or outside current content",
                highlight.id,
                highlight.start,
                highlight.end
            );
            summary.skipped += 1;
            continue;
        };
        apply_highlight(tree, &range, &highlight.color, &highlight.id);
        summary.applied += 1;
    }

    log::debug!("Materialized highlights under {root:?}: {summary:?}");
    summary
}

/// Materialize into the container with element id `container_id`.
///
/// Returns `None` without touching the tree when no such container exists.
pub fn apply_stored_highlights(
    tree: &mut DocumentTree,
    highlights: &[Highlight],
    container_id: &str,
) -> Option<MaterializeSummary> {
    let container = tree.find_by_id(container_id)?;
    Some(materialize(tree, highlights, container))
}

/// Leaf positions of linear offsets `start` and `end` under `root`.
///
/// Each offset goes to the first leaf whose `[running, running + len]`
/// interval contains it. Both bounds are inclusive, so an offset on a leaf
/// boundary resolves to the end of the earlier leaf.
pub fn find_boundaries(
    tree: &DocumentTree,
    root: NodeId,
    start: usize,
    end: usize,
) -> Option<TreeRange> {
    let mut running = 0;
    let mut start_pos = None;
    let mut end_pos = None;

    for leaf in tree.leaves(root) {
        let next = running + tree.text_len(leaf);

        if start_pos.is_none() && (running..=next).contains(&start) {
            start_pos = Some(Position::new(leaf, start - running));
        }
        if end_pos.is_none() && (running..=next).contains(&end) {
            end_pos = Some(Position::new(leaf, end - running));
        }
        if start_pos.is_some() && end_pos.is_some() {
            break;
        }
        running = next;
    }

    Some(TreeRange::new(start_pos?, end_pos?))
}
