//! Turning the user's selection into a highlight.
//!
//! This is the write path: it marks the tree immediately so the user sees the
//! highlight, and hands back the record for the caller to persist. The next
//! materialize pass reconciles the tree with whatever the store then holds.

use crate::apply::apply_highlight;
use crate::highlight::{Highlight, IdGenerator};
use crate::materialize::find_boundaries;
use crate::remove::remove_overlapping;
use crate::resolve::text_offset;
use crate::tree::{DocumentTree, NodeId, TreeRange};

/// Platform selection state.
pub trait SelectionSource {
    /// The active selection range, if any
    fn current(&self) -> Option<TreeRange>;
    /// Drop the active selection
    fn clear(&mut self);
}

/// A selection held in memory, for callers without a live platform selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSelection {
    range: Option<TreeRange>,
}

impl StaticSelection {
    pub fn new(range: TreeRange) -> Self {
        Self { range: Some(range) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Selection covering linear offsets `start..end` of `root`'s text.
    ///
    /// Empty when either offset lies outside the text.
    pub fn from_offsets(tree: &DocumentTree, root: NodeId, start: usize, end: usize) -> Self {
        Self {
            range: find_boundaries(tree, root, start.min(end), start.max(end)),
        }
    }
}

impl SelectionSource for StaticSelection {
    fn current(&self) -> Option<TreeRange> {
        self.range
    }

    fn clear(&mut self) {
        self.range = None;
    }
}

/// Create a highlight from the active selection inside `container_id`.
///
/// Returns `None` when there is no selection, the selection lies outside the
/// container (or the container is missing), or the selection is zero-width.
/// A zero-width selection is still cleared.
///
/// On success any markers touching the selection are unwrapped, the new
/// highlight is marked in the tree, and the selection is cleared.
pub fn create_highlight_from_selection<S, G>(
    tree: &mut DocumentTree,
    selection: &mut S,
    container_id: &str,
    color: &str,
    ids: &mut G,
) -> Option<Highlight>
where
    S: SelectionSource + ?Sized,
    G: IdGenerator + ?Sized,
{
    let range = selection.current()?;
    // backwards drags report the focus before the anchor
    let range = TreeRange::ordered(tree, range.start, range.end);
    let container = tree.find_by_id(container_id)?;
    let ancestor = range.common_ancestor(tree)?;
    if !tree.contains(container, ancestor) {
        log::debug!("Selection is outside container {container_id}");
        return None;
    }

    let start = text_offset(tree, container, range.start.node, range.start.offset);
    let end = text_offset(tree, container, range.end.node, range.end.offset);
    if start == end {
        selection.clear();
        return None;
    }

    remove_overlapping(tree, container, &range);

    // Container-relative child indices shift when markers are unwrapped.
    let range = if range.is_leaf_anchored(tree) {
        range
    } else {
        find_boundaries(tree, container, start, end).unwrap_or(range)
    };

    let highlight = Highlight::new(ids.generate(), start, end, color);
    apply_highlight(tree, &range, &highlight.color, &highlight.id);
    selection.clear();

    Some(highlight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::DEFAULT_COLOR;
    use crate::tree::{Position, TreeBuilder, invariants};
    use pretty_assertions::assert_eq;

    fn page() -> DocumentTree {
        let mut b = TreeBuilder::new("body", None);
        b.element("h1", "Text Selection");
        b.open_with_id("div", "c")
            .element("h2", "Sample Content")
            .element("p", "Lorem ipsum");
        b.finish()
    }

    fn leaf(tree: &DocumentTree, index: usize) -> NodeId {
        tree.leaves(tree.root()).nth(index).unwrap()
    }

    fn fixed_ids() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("id-{n}")
        }
    }

    #[test]
    fn test_selection_inside_container_creates_highlight() {
        let mut tree = page();
        let sample = leaf(&tree, 1);
        let mut selection =
            StaticSelection::new(TreeRange::new(Position::new(sample, 7), Position::new(sample, 14)));

        let highlight =
            create_highlight_from_selection(&mut tree, &mut selection, "c", DEFAULT_COLOR, &mut fixed_ids());

        assert_eq!(highlight, Some(Highlight::new("id-1", 7, 14, "yellow")));
        assert_eq!(selection.current(), None);
        let markers = tree.markers_for(tree.root(), "id-1");
        assert_eq!(markers.len(), 1);
        assert_eq!(tree.text_content(markers[0]), "Content");
    }

    #[test]
    fn test_backwards_selection_is_put_in_document_order() {
        let mut tree = page();
        let sample = leaf(&tree, 1);
        let mut selection =
            StaticSelection::new(TreeRange::new(Position::new(sample, 14), Position::new(sample, 7)));

        let highlight =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids())
                .unwrap();

        assert_eq!((highlight.start, highlight.end), (7, 14));
        let markers = tree.markers_for(tree.root(), "id-1");
        assert_eq!(markers.len(), 1);
        assert_eq!(tree.text_content(markers[0]), "Content");
    }

    #[test]
    fn test_backwards_selection_across_blocks() {
        let mut tree = page();
        let (sample, lorem) = (leaf(&tree, 1), leaf(&tree, 2));
        let mut selection =
            StaticSelection::new(TreeRange::new(Position::new(lorem, 5), Position::new(sample, 7)));

        let highlight =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids())
                .unwrap();

        assert_eq!((highlight.start, highlight.end), (7, 19));
        let texts: Vec<_> = tree
            .markers_for(tree.root(), "id-1")
            .into_iter()
            .map(|m| tree.text_content(m))
            .collect();
        assert_eq!(texts, vec!["Content", "Lorem"]);
        invariants::check(&tree);
    }

    #[test]
    fn test_no_selection() {
        let mut tree = page();
        let mut selection = StaticSelection::empty();

        let result =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids());

        assert_eq!(result, None);
    }

    #[test]
    fn test_selection_outside_container_is_ignored() {
        let mut tree = page();
        let title = leaf(&tree, 0);
        let range = TreeRange::new(Position::new(title, 0), Position::new(title, 4));
        let mut selection = StaticSelection::new(range);

        let result =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids());

        assert_eq!(result, None);
        assert_eq!(selection.current(), Some(range));
        assert!(tree.markers(tree.root()).is_empty());
    }

    #[test]
    fn test_missing_container() {
        let mut tree = page();
        let sample = leaf(&tree, 1);
        let mut selection =
            StaticSelection::new(TreeRange::new(Position::new(sample, 0), Position::new(sample, 3)));

        let result =
            create_highlight_from_selection(&mut tree, &mut selection, "nope", "yellow", &mut fixed_ids());

        assert_eq!(result, None);
    }

    #[test]
    fn test_click_without_drag_creates_nothing_and_clears() {
        let mut tree = page();
        let sample = leaf(&tree, 1);
        let point = Position::new(sample, 3);
        let mut selection = StaticSelection::new(TreeRange::new(point, point));

        let result =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids());

        assert_eq!(result, None);
        assert_eq!(selection.current(), None);
        assert!(tree.markers(tree.root()).is_empty());
    }

    #[test]
    fn test_new_selection_replaces_overlapping_marker() {
        let mut tree = page();
        let mut ids = fixed_ids();
        let container = tree.find_by_id("c").unwrap();

        let mut first = StaticSelection::from_offsets(&tree, container, 0, 10);
        let a = create_highlight_from_selection(&mut tree, &mut first, "c", "yellow", &mut ids).unwrap();

        let mut second = StaticSelection::from_offsets(&tree, container, 7, 20);
        let b = create_highlight_from_selection(&mut tree, &mut second, "c", "pink", &mut ids).unwrap();

        assert_eq!((a.start, a.end), (0, 10));
        assert_eq!((b.start, b.end), (7, 20));
        assert!(tree.markers_for(container, &a.id).is_empty());
        let b_text: Vec<_> = tree
            .markers_for(container, &b.id)
            .into_iter()
            .map(|m| tree.text_content(m))
            .collect();
        assert_eq!(b_text, vec!["Con", "tent", "Lorem "]);
        invariants::check(&tree);
    }

    #[test]
    fn test_container_anchored_selection_is_resolved_to_leaves() {
        let mut tree = page();
        let container = tree.find_by_id("c").unwrap();
        // from the start of <p> to the end of the container
        let range = TreeRange::new(Position::new(container, 1), Position::new(container, 2));
        let mut selection = StaticSelection::new(range);

        let highlight =
            create_highlight_from_selection(&mut tree, &mut selection, "c", "yellow", &mut fixed_ids())
                .unwrap();

        assert_eq!((highlight.start, highlight.end), (14, 25));
        let markers = tree.markers_for(container, &highlight.id);
        assert_eq!(markers.len(), 1);
        assert_eq!(tree.text_content(markers[0]), "Lorem ipsum");
    }
}
