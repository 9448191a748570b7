//! Per-invocation bucket registry and the fixed emission order.
//!
//! A registry is built fresh for each reorder call and consumed by
//! [`HeadBuckets::emit_in_order`]; it carries no cross-call state. Children
//! are moved in during classification, so a node can occupy at most one
//! bucket.

use crate::Node;

/// Bucket identifiers, one per registry slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    MetaCharset,
    LinkStylesheetRuntimeCss,
    StyleAmpRuntime,
    MetaOther,
    ScriptAmpEngine,
    ScriptAmpViewer,
    ScriptGmailAmpViewer,
    ScriptRenderDelayingExtensions,
    ScriptNonRenderDelayingExtensions,
    LinkIcons,
    LinkResourceHints,
    LinkStylesheetsBeforeAmpCustom,
    StyleAmpCustom,
    Other,
    StyleAmpBoilerplate,
    Noscript,
}

/// The canonical head layout, as data rather than control flow.
///
/// Invariant: exactly one entry per [`Slot`]. The emitter walks this table;
/// reordering the head means reordering this list.
pub const EMIT_ORDER: [Slot; 16] = [
    Slot::MetaCharset,
    Slot::LinkStylesheetRuntimeCss,
    Slot::StyleAmpRuntime,
    Slot::MetaOther,
    Slot::ScriptAmpEngine,
    Slot::ScriptAmpViewer,
    Slot::ScriptGmailAmpViewer,
    Slot::ScriptRenderDelayingExtensions,
    Slot::ScriptNonRenderDelayingExtensions,
    Slot::LinkIcons,
    Slot::LinkResourceHints,
    Slot::LinkStylesheetsBeforeAmpCustom,
    Slot::StyleAmpCustom,
    Slot::Other,
    Slot::StyleAmpBoilerplate,
    Slot::Noscript,
];

/// Classified head children, bucketed by semantic category.
///
/// Single-occupant slots are `Option`; list buckets preserve the relative
/// document order in which nodes were appended.
#[derive(Debug, Default)]
pub struct HeadBuckets {
    pub meta_charset: Option<Node>,
    pub script_amp_engine: Option<Node>,
    pub script_amp_viewer: Option<Node>,
    pub script_gmail_amp_viewer: Option<Node>,
    pub style_amp_runtime: Option<Node>,
    pub style_amp_custom: Option<Node>,
    pub style_amp_boilerplate: Option<Node>,
    pub link_stylesheet_runtime_css: Option<Node>,
    pub noscript: Option<Node>,
    pub meta_other: Vec<Node>,
    pub script_render_delaying_extensions: Vec<Node>,
    pub script_non_render_delaying_extensions: Vec<Node>,
    pub link_icons: Vec<Node>,
    pub link_resource_hints: Vec<Node>,
    pub link_stylesheets_before_amp_custom: Vec<Node>,
    pub other: Vec<Node>,
}

impl HeadBuckets {
    /// Drain every bucket into `out`, following [`EMIT_ORDER`].
    pub fn emit_in_order(mut self, out: &mut Vec<Node>) {
        for slot in EMIT_ORDER {
            match slot {
                Slot::MetaCharset => out.extend(self.meta_charset.take()),
                Slot::LinkStylesheetRuntimeCss => {
                    out.extend(self.link_stylesheet_runtime_css.take())
                }
                Slot::StyleAmpRuntime => out.extend(self.style_amp_runtime.take()),
                Slot::MetaOther => out.append(&mut self.meta_other),
                Slot::ScriptAmpEngine => out.extend(self.script_amp_engine.take()),
                Slot::ScriptAmpViewer => out.extend(self.script_amp_viewer.take()),
                Slot::ScriptGmailAmpViewer => out.extend(self.script_gmail_amp_viewer.take()),
                Slot::ScriptRenderDelayingExtensions => {
                    out.append(&mut self.script_render_delaying_extensions)
                }
                Slot::ScriptNonRenderDelayingExtensions => {
                    out.append(&mut self.script_non_render_delaying_extensions)
                }
                Slot::LinkIcons => out.append(&mut self.link_icons),
                Slot::LinkResourceHints => out.append(&mut self.link_resource_hints),
                Slot::LinkStylesheetsBeforeAmpCustom => {
                    out.append(&mut self.link_stylesheets_before_amp_custom)
                }
                Slot::StyleAmpCustom => out.extend(self.style_amp_custom.take()),
                Slot::Other => out.append(&mut self.other),
                Slot::StyleAmpBoilerplate => out.extend(self.style_amp_boilerplate.take()),
                Slot::Noscript => out.extend(self.noscript.take()),
            }
        }
    }
}
