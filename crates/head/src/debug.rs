//! Compact node labels for logs, golden fixtures, and test diffs.

use crate::Node;
use std::fmt::Write;

const PREVIEW_CHARS: usize = 40;

/// One-line label for a node: `<link rel="stylesheet" href="a.css">`,
/// `#text " "`, `<!-- note -->`.
///
/// Attributes print in document order; valueless attributes print bare.
pub fn label(node: &Node) -> String {
    match node {
        Node::Element {
            name, attributes, ..
        } => {
            let mut out = String::with_capacity(16 + name.len());
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    let _ = write!(&mut out, "=\"{value}\"");
                }
            }
            out.push('>');
            out
        }
        Node::Text { text } => {
            let mut out = String::from("#text \"");
            push_preview(&mut out, text);
            out.push('"');
            out
        }
        Node::Comment { text } => {
            let mut out = String::from("<!-- ");
            push_preview(&mut out, text);
            out.push_str(" -->");
            out
        }
        Node::Document { .. } => "#document".to_string(),
    }
}

/// Labels for each direct child of `head`, in order.
pub fn head_outline(head: &Node) -> Vec<String> {
    match head.children() {
        Some(children) => children.iter().map(label).collect(),
        None => Vec::new(),
    }
}

fn push_preview(out: &mut String, text: &str) {
    let mut truncated = false;
    for (i, ch) in text.chars().enumerate() {
        if i == PREVIEW_CHARS {
            truncated = true;
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    if truncated {
        out.push('…');
    }
}
