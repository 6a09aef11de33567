//! Serializing a tree for display.
//!
//! - [`to_html`]: markup with markers as `<span data-highlight-id=...>`
//! - [`outline`]: indented one-node-per-line dump, handy in tests and logs

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::tree::{DocumentTree, NodeId, NodeKind};

const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Render `node` and its subtree as HTML.
pub fn to_html(tree: &DocumentTree, node: NodeId) -> String {
    let mut out = String::new();
    write_html(tree, node, &mut out);
    out
}

fn write_html(tree: &DocumentTree, node: NodeId, out: &mut String) {
    match tree.kind(node) {
        NodeKind::Text(text) => out.push_str(&encode_text(text)),
        NodeKind::Element { tag, id } => {
            out.push('<');
            out.push_str(tag);
            if let Some(id) = id {
                let _ = write!(out, " id=\"{}\"", encode_double_quoted_attribute(id));
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            write_children(tree, node, out);
            let _ = write!(out, "</{tag}>");
        }
        NodeKind::Marker {
            highlight_id,
            color,
        } => {
            let _ = write!(
                out,
                "<span data-highlight-id=\"{}\" style=\"background-color: {}\">",
                encode_double_quoted_attribute(highlight_id),
                encode_double_quoted_attribute(color)
            );
            write_children(tree, node, out);
            out.push_str("</span>");
        }
    }
}

fn write_children(tree: &DocumentTree, node: NodeId, out: &mut String) {
    for &child in tree.children(node) {
        write_html(tree, child, out);
    }
}

/// Indented dump of `node`'s subtree, one node per line.
pub fn outline(tree: &DocumentTree, node: NodeId) -> String {
    let mut out = String::new();
    write_outline(tree, node, 0, &mut out);
    out
}

fn write_outline(tree: &DocumentTree, node: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = match tree.kind(node) {
        NodeKind::Text(text) => writeln!(out, "{indent}{text:?}"),
        NodeKind::Element { tag, id: Some(id) } => writeln!(out, "{indent}{tag}#{id}"),
        NodeKind::Element { tag, id: None } => writeln!(out, "{indent}{tag}"),
        NodeKind::Marker {
            highlight_id,
            color,
        } => writeln!(out, "{indent}mark[{highlight_id} {color}]"),
    };
    for &child in tree.children(node) {
        write_outline(tree, child, depth + 1, out);
    }
}
