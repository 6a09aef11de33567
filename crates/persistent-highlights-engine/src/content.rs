//! Markdown content source.
//!
//! Renders markdown into a [`DocumentTree`] the way a browser would build the
//! DOM for the equivalent HTML: one element per block or inline tag, one text
//! leaf per run of text. The whole document sits inside a `div` carrying the
//! container id highlights are addressed by.

use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

use crate::tree::{DocumentTree, TreeBuilder};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read content at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Build a tree for `markdown` wrapped in `<div id={container_id}>`.
pub fn parse_markdown(markdown: &str, container_id: &str) -> DocumentTree {
    let mut loader = Loader {
        builder: TreeBuilder::new("div", Some(container_id)),
        pending: String::new(),
    };

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                loader.pending.push_str(&text)
            }
            Event::FootnoteReference(label) => loader.pending.push_str(&label),
            Event::SoftBreak => loader.pending.push('\n'),
            Event::Start(tag) => {
                loader.flush();
                loader.builder.open(tag_name(&tag));
            }
            Event::End(_) => {
                loader.flush();
                loader.builder.close();
            }
            Event::Code(code) => {
                loader.flush();
                loader.builder.element("code", &code);
            }
            Event::HardBreak => {
                loader.flush();
                loader.builder.empty("br");
            }
            Event::Rule => {
                loader.flush();
                loader.builder.empty("hr");
            }
            // raw HTML and task markers carry no readable text
            _ => {}
        }
    }

    loader.flush();
    loader.builder.finish()
}

/// Read a markdown file and build its tree.
pub fn load_markdown(path: &Path, container_id: &str) -> Result<DocumentTree, ContentError> {
    let markdown = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_markdown(&markdown, container_id))
}

struct Loader {
    builder: TreeBuilder,
    /// Adjacent text events are merged into one leaf
    pending: String,
}

impl Loader {
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.builder.text(&self.pending);
            self.pending.clear();
        }
    }
}

fn tag_name(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => heading_tag(*level),
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Link { .. } => "a",
        // alt text stays readable, so no void <img>
        Tag::Image { .. } => "span",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        _ => "div",
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::outline;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_and_paragraphs() {
        let tree = parse_markdown("## Sample Content\n\nLorem *ipsum* dolor\n", "c");

        insta::assert_snapshot!(outline(&tree, tree.root()).trim_end(), @r#"
        div#c
          h2
            "Sample Content"
          p
            "Lorem "
            em
              "ipsum"
            " dolor"
        "#);
    }

    #[test]
    fn test_soft_breaks_join_into_one_leaf() {
        let tree = parse_markdown("one\ntwo", "c");
        let leaves: Vec<_> = tree.leaves(tree.root()).collect();

        assert_eq!(leaves.len(), 1);
        assert_eq!(tree.text(leaves[0]), Some("one\ntwo"));
    }

    #[test]
    fn test_lists_code_and_rules() {
        let tree = parse_markdown("- a `b`\n- c\n\n---\n", "c");

        insta::assert_snapshot!(outline(&tree, tree.root()).trim_end(), @r#"
        div#c
          ul
            li
              "a "
              code
                "b"
            li
              "c"
          hr
        "#);
    }

    #[test]
    fn test_container_is_findable() {
        let tree = parse_markdown("text", "text-selection-container");
        assert_eq!(tree.find_by_id("text-selection-container"), Some(tree.root()));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_markdown(&dir.path().join("missing.md"), "c");
        assert!(matches!(result, Err(ContentError::Read { .. })));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        std::fs::write(&path, "# Title\n").unwrap();

        let tree = load_markdown(&path, "c").unwrap();
        assert_eq!(tree.text_content(tree.root()), "Title");
    }
}
