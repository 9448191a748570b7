//! Public reorder entry points.

use crate::Node;
use crate::classify::classify_children;

/// Per-call instrumentation, logged at debug level.
#[derive(Clone, Copy, Debug, Default)]
struct ReorderCounters {
    children_in: usize,
    children_out: usize,
}

/// Normalize the child order of a head element, in place.
///
/// The child list is taken up front, fully classified, then re-emitted in
/// the canonical order, so a caller never observes a partially reordered
/// head. Children subject to an explicit drop rule (duplicate
/// `<meta charset>`, stylesheet links after `<style amp-custom>`, displaced
/// single-slot occupants) do not reappear in the output.
///
/// Idempotent: reordering an already reordered head changes nothing.
///
/// A node without a child list (text, comment) is a contract violation by
/// the caller and is skipped with a debug log rather than touched.
pub fn reorder_head(head: &mut Node) {
    let Some(children) = head.children_mut() else {
        log::debug!(target: "head.reorder", "reorder target has no child list; skipping");
        return;
    };

    let input = std::mem::take(children);
    let mut counters = ReorderCounters {
        children_in: input.len(),
        ..ReorderCounters::default()
    };

    let mut out = Vec::with_capacity(counters.children_in);
    classify_children(input).emit_in_order(&mut out);
    counters.children_out = out.len();
    *children = out;

    log::debug!(
        target: "head.reorder",
        "reordered head: {} in, {} out, {} dropped",
        counters.children_in,
        counters.children_out,
        counters.children_in - counters.children_out,
    );
}

/// Locate `<head>` under `<html>` and reorder it in place.
///
/// Returns whether a head element was found. A document without one is left
/// untouched.
pub fn reorder_document_head(doc: &mut Node) -> bool {
    match find_head_mut(doc) {
        Some(head) => {
            reorder_head(head);
            true
        }
        None => {
            log::debug!(target: "head.reorder", "document has no <head>; nothing to reorder");
            false
        }
    }
}

fn find_head_mut(doc: &mut Node) -> Option<&mut Node> {
    let Node::Document { children, .. } = doc else {
        return None;
    };
    let html = children.iter_mut().find(|c| c.tag_is("html"))?;
    html.children_mut()?
        .iter_mut()
        .find(|c| c.tag_is("head"))
}
