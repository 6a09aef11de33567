use super::{DocumentTree, NodeId, NodeKind};

/// Stack-based construction of a [`DocumentTree`].
///
/// ```rust
/// # use persistent_highlights_engine::tree::TreeBuilder;
/// let mut b = TreeBuilder::new("div", Some("content"));
/// b.element("h2", "Sample Content")
///     .open("ul")
///     .element("li", "one")
///     .element("li", "two")
///     .close();
/// let tree = b.finish();
/// assert_eq!(tree.text_content(tree.root()), "Sample Contentonetwo");
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: DocumentTree,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new(tag: &str, id: Option<&str>) -> Self {
        let tree = DocumentTree::new(tag, id);
        let root = tree.root();
        Self {
            tree,
            stack: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.tree.root())
    }

    fn open_kind(&mut self, kind: NodeKind) -> &mut Self {
        let parent = self.current();
        let node = self.tree.push_child(parent, kind);
        self.stack.push(node);
        self
    }

    /// Open a child element; subsequent nodes go inside it until `close`.
    pub fn open(&mut self, tag: &str) -> &mut Self {
        self.open_kind(NodeKind::Element {
            tag: tag.to_string(),
            id: None,
        })
    }

    pub fn open_with_id(&mut self, tag: &str, id: &str) -> &mut Self {
        self.open_kind(NodeKind::Element {
            tag: tag.to_string(),
            id: Some(id.to_string()),
        })
    }

    /// Open a pre-existing annotation marker
    pub fn marker(&mut self, highlight_id: &str, color: &str) -> &mut Self {
        self.open_kind(NodeKind::Marker {
            highlight_id: highlight_id.to_string(),
            color: color.to_string(),
        })
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        let parent = self.current();
        self.tree.push_child(parent, NodeKind::Text(text.to_string()));
        self
    }

    /// Childless element such as `br`
    pub fn empty(&mut self, tag: &str) -> &mut Self {
        self.open(tag).close()
    }

    /// Shorthand for `open(tag).text(text).close()`
    pub fn element(&mut self, tag: &str, text: &str) -> &mut Self {
        self.open(tag).text(text).close()
    }

    /// Close the innermost open node. The root is never closed.
    pub fn close(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self
    }

    pub fn finish(self) -> DocumentTree {
        self.tree
    }
}
