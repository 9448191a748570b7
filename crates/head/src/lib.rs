//! Deterministic `<head>` normalization.
//!
//! Classifies every direct child of a parsed `<head>` element into a fixed
//! set of semantic buckets and re-emits them in a canonical priority order,
//! so downstream caching and resource-loading stages see a stable head
//! layout regardless of how the document author ordered it.
//!
//! Parsing and serialization live elsewhere; this crate only rearranges the
//! child list of a head element it is handed.

pub mod buckets;
pub mod classify;
pub mod debug;

mod reorder;
mod types;

pub use crate::buckets::{EMIT_ORDER, HeadBuckets, Slot};
pub use crate::classify::classify_children;
pub use crate::reorder::{reorder_document_head, reorder_head};
pub use crate::types::Node;
