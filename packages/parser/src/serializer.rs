//! Serializers turning the tree back into prompt text.
//!
//! Three text modes live here:
//! - [`serialize_node`]: canonical, indented; trims text and re-indents.
//! - [`serialize_node_preserving`]: keeps text content as written, dropping
//!   only leading/trailing blank lines; minimizes diffs after an edit.
//! - [`serialize_flat`]: rebuild mode used after structural edits. Never
//!   injects indentation, so repeated edits cannot compound it.
//!
//! Plus [`copyable_text`], the export view over enabled top-level nodes.

use crate::ast::Node;

const INDENT_WIDTH: usize = 4;

fn pad(indent: usize) -> String {
    " ".repeat(indent * INDENT_WIDTH)
}

/// A renamed-to-empty tag still serializes; fall back to a generic name.
pub(crate) fn effective_tag(tag_name: &str) -> &str {
    if tag_name.is_empty() {
        "div"
    } else {
        tag_name
    }
}

/// Exactly one text child without a newline collapses the element to a
/// single line in every mode.
fn single_line_text_child(children: &[Node]) -> Option<&str> {
    match children {
        [Node::Text { content, .. }] if !content.contains('\n') => Some(content.as_str()),
        _ => None,
    }
}

/// Canonical indented rendering: 4 spaces per depth, text trimmed.
pub fn serialize_node(node: &Node, indent: usize) -> String {
    let pad = pad(indent);
    match node {
        Node::Text { content, .. } => {
            let value = content.trim();
            if value.is_empty() {
                String::new()
            } else {
                format!("{pad}{value}")
            }
        }
        Node::Element {
            tag_name, children, ..
        } => {
            let tag = effective_tag(tag_name);
            if children.is_empty() {
                return format!("{pad}<{tag}></{tag}>");
            }
            if let Some(value) = single_line_text_child(children) {
                return format!("{pad}<{tag}>{}</{tag}>", value.trim());
            }
            let body: Vec<String> = children
                .iter()
                .map(|child| serialize_node(child, indent + 1))
                .filter(|line| !line.is_empty())
                .collect();
            format!("{pad}<{tag}>\n{}\n{pad}</{tag}>", body.join("\n"))
        }
    }
}

/// Like [`serialize_node`], but text content is kept as written; only the
/// blank lines hugging either end are dropped.
pub fn serialize_node_preserving(node: &Node, indent: usize) -> String {
    match node {
        Node::Text { content, .. } => strip_blank_edges(content).to_string(),
        Node::Element {
            tag_name, children, ..
        } => {
            let pad = pad(indent);
            let tag = effective_tag(tag_name);
            if children.is_empty() {
                return format!("{pad}<{tag}></{tag}>");
            }
            if let Some(value) = single_line_text_child(children) {
                return format!("{pad}<{tag}>{}</{tag}>", value.trim());
            }
            let body: Vec<String> = children
                .iter()
                .map(|child| match child {
                    Node::Text { content, .. } => {
                        if content.trim().is_empty() {
                            String::new()
                        } else {
                            content.clone()
                        }
                    }
                    Node::Element { .. } => serialize_node_preserving(child, indent + 1),
                })
                .filter(|part| !part.is_empty())
                .collect();
            format!("{pad}<{tag}>\n{}\n{pad}</{tag}>", body.join("\n"))
        }
    }
}

/// Rebuild the whole forest with no indentation at all.
///
/// Multi-child elements wrap their newline-joined children; text passing
/// through is normalized line by line so nested indentation cannot drift
/// across repeated edits. Top-level blocks are separated by a blank line.
pub fn serialize_flat(nodes: &[Node]) -> String {
    let blocks: Vec<String> = nodes
        .iter()
        .map(serialize_node_flat)
        .filter(|block| !block.is_empty())
        .collect();
    blocks.join("\n\n")
}

fn serialize_node_flat(node: &Node) -> String {
    match node {
        Node::Text { content, .. } => normalize_lines(content),
        Node::Element {
            tag_name, children, ..
        } => {
            let tag = effective_tag(tag_name);
            if children.is_empty() {
                return format!("<{tag}></{tag}>");
            }
            if let Some(value) = single_line_text_child(children) {
                return format!("<{tag}>{}</{tag}>", value.trim());
            }
            let body: Vec<String> = children
                .iter()
                .map(serialize_node_flat)
                .filter(|part| !part.is_empty())
                .collect();
            if body.is_empty() {
                format!("<{tag}></{tag}>")
            } else {
                format!("<{tag}>\n{}\n</{tag}>", body.join("\n"))
            }
        }
    }
}

/// Export view: enabled top-level nodes rendered canonically, blank-line
/// separated. Disabled top-level nodes are left out entirely.
pub fn copyable_text(nodes: &[Node]) -> String {
    let blocks: Vec<String> = nodes
        .iter()
        .filter(|node| node.enabled())
        .map(|node| serialize_node(node, 0))
        .filter(|block| !block.is_empty())
        .collect();
    blocks.join("\n\n")
}

/// Trim each line and drop the blank ones.
fn normalize_lines(content: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

/// Remove leading and trailing blank lines without touching inner content.
///
/// A leading whitespace run is cut through its last newline (keeping the
/// final line's indentation); a trailing run is cut from its first newline.
fn strip_blank_edges(content: &str) -> &str {
    let mut out = content;

    let lead_len = out.len() - out.trim_start().len();
    if let Some(newline) = out[..lead_len].rfind('\n') {
        out = &out[newline + 1..];
    }

    let tail_start = out.trim_end().len();
    if let Some(newline) = out[tail_start..].find('\n') {
        out = &out[..tail_start + newline];
    }

    out
}
