//! Per-tag-family classification rules.
//!
//! One forward pass over the head's children in document order. The scan is
//! stateful on purpose: whether a plain stylesheet link survives depends on
//! whether `<style amp-custom>` has already been claimed earlier in the same
//! pass, so iteration order must stay sequential.
//!
//! All attribute matching is defensive: an absent attribute is a non-match,
//! never an error, and anything unrecognized degrades into the `other`
//! bucket.

use crate::Node;
use crate::buckets::HeadBuckets;
use crate::debug::label;

const AMP_CDN_PREFIX: &str = "https://cdn.ampproject.org/";
const RUNTIME_CSS_SUFFIX: &str = "/v0.css";

const ENGINE_SUFFIXES: [&str; 4] = ["/v0.js", "/v0.js.br", "/amp4ads-v0.js", "/amp4ads-v0.js.br"];

const GMAIL_VIEWER_PREFIX: &str = "https://cdn.ampproject.org/v0/amp-viewer-integration-gmail-";
const VIEWER_INTEGRATION_PREFIX: &str = "https://cdn.ampproject.org/v0/amp-viewer-integration-";
const GOOGLE_VIEWER_PREFIX: &str = "https://cdn.ampproject.org/viewer/google/v";

/// Attributes that mark a script as an extension script.
const EXTENSION_ATTRS: [&str; 3] = ["custom-element", "custom-template", "host-service"];

/// Extensions whose scripts must load before first render.
const RENDER_DELAYING_EXTENSIONS: [&str; 3] =
    ["amp-story", "amp-experiment", "amp-dynamic-css-classes"];

/// Bucket every child, consuming the list.
///
/// Each child is visited exactly once and lands in exactly one bucket or is
/// dropped by an explicit rule (trace-logged). Only direct children are
/// classified; descendants are never inspected.
pub fn classify_children(children: Vec<Node>) -> HeadBuckets {
    let mut buckets = HeadBuckets::default();
    for child in children {
        classify_child(child, &mut buckets);
    }
    buckets
}

fn classify_child(child: Node, buckets: &mut HeadBuckets) {
    if child.tag_is("meta") {
        classify_meta(child, buckets);
    } else if child.tag_is("script") {
        classify_script(child, buckets);
    } else if child.tag_is("style") {
        classify_style(child, buckets);
    } else if child.tag_is("link") {
        classify_link(child, buckets);
    } else if child.tag_is("noscript") {
        replace_single(&mut buckets.noscript, child, "noscript");
    } else {
        // Unrecognized elements, text, and comments keep their relative
        // order in the `other` bucket.
        buckets.other.push(child);
    }
}

fn classify_meta(node: Node, buckets: &mut HeadBuckets) {
    if !node.has_attr("charset") {
        buckets.meta_other.push(node);
        return;
    }
    if buckets.meta_charset.is_none() {
        buckets.meta_charset = Some(node);
    } else {
        // First charset wins; later ones never reach the output.
        log::trace!(target: "head.classify", "dropping duplicate meta charset: {}", label(&node));
    }
}

#[derive(Clone, Copy, Debug)]
enum AmpScriptKind {
    Engine,
    GmailViewer,
    Viewer,
    Unrecognized,
}

fn classify_script(node: Node, buckets: &mut HeadBuckets) {
    if EXTENSION_ATTRS.iter().any(|name| node.has_attr(name)) {
        let render_delaying = node
            .attr("custom-element")
            .is_some_and(|ext| RENDER_DELAYING_EXTENSIONS.contains(&ext));
        if render_delaying {
            buckets.script_render_delaying_extensions.push(node);
        } else {
            buckets.script_non_render_delaying_extensions.push(node);
        }
        return;
    }

    if !node.has_attr("async") {
        buckets.other.push(node);
        return;
    }

    match amp_script_kind(node.attr("src")) {
        AmpScriptKind::Engine => {
            replace_single(&mut buckets.script_amp_engine, node, "amp engine script");
        }
        AmpScriptKind::GmailViewer => {
            replace_single(
                &mut buckets.script_gmail_amp_viewer,
                node,
                "gmail viewer script",
            );
        }
        AmpScriptKind::Viewer => {
            replace_single(&mut buckets.script_amp_viewer, node, "viewer script");
        }
        AmpScriptKind::Unrecognized => buckets.other.push(node),
    }
}

/// Classify an async script's `src` against the AMP CDN URL families.
///
/// The gmail integration prefix extends the generic integration prefix, so
/// it is tested first.
fn amp_script_kind(src: Option<&str>) -> AmpScriptKind {
    let Some(src) = src else {
        return AmpScriptKind::Unrecognized;
    };
    if src.starts_with(AMP_CDN_PREFIX) && ENGINE_SUFFIXES.iter().any(|end| src.ends_with(end)) {
        AmpScriptKind::Engine
    } else if src.starts_with(GMAIL_VIEWER_PREFIX) && src.ends_with(".js") {
        AmpScriptKind::GmailViewer
    } else if src.starts_with(VIEWER_INTEGRATION_PREFIX)
        || (src.starts_with(GOOGLE_VIEWER_PREFIX) && src.ends_with(".js"))
    {
        AmpScriptKind::Viewer
    } else {
        AmpScriptKind::Unrecognized
    }
}

fn classify_style(node: Node, buckets: &mut HeadBuckets) {
    if node.has_attr("amp-runtime") {
        replace_single(&mut buckets.style_amp_runtime, node, "runtime style");
    } else if node.has_attr("amp-custom") {
        replace_single(&mut buckets.style_amp_custom, node, "amp-custom style");
    } else if node.has_attr("amp-boilerplate") || node.has_attr("amp4ads-boilerplate") {
        replace_single(
            &mut buckets.style_amp_boilerplate,
            node,
            "boilerplate style",
        );
    } else {
        buckets.other.push(node);
    }
}

fn classify_link(node: Node, buckets: &mut HeadBuckets) {
    // `rel` is matched as one exact string. A multi-token value such as
    // "dns-prefetch preconnect" is a literal key here, not a token set.
    let rel = node.attr("rel");
    if rel == Some("stylesheet") {
        if node.attr("href").is_some_and(is_runtime_css_href) {
            replace_single(
                &mut buckets.link_stylesheet_runtime_css,
                node,
                "runtime css link",
            );
        } else if buckets.style_amp_custom.is_none() {
            buckets.link_stylesheets_before_amp_custom.push(node);
        } else {
            // Re-emitting this link ahead of <style amp-custom> would change
            // the cascade, so it is dropped rather than kept out of place.
            log::trace!(target: "head.classify", "dropping stylesheet after amp-custom: {}", label(&node));
        }
    } else if matches!(rel, Some("icon" | "icon shortcut" | "shortcut icon")) {
        buckets.link_icons.push(node);
    } else if rel == Some("dns-prefetch preconnect") {
        buckets.link_resource_hints.push(node);
    } else {
        buckets.other.push(node);
    }
}

fn is_runtime_css_href(href: &str) -> bool {
    href.starts_with(AMP_CDN_PREFIX) && href.ends_with(RUNTIME_CSS_SUFFIX)
}

fn replace_single(slot: &mut Option<Node>, node: Node, what: &str) {
    if let Some(displaced) = slot.replace(node) {
        log::trace!(target: "head.classify", "dropping displaced {what}: {}", label(&displaced));
    }
}

#[cfg(test)]
mod tests {
    use super::classify_children;
    use crate::Node;
    use crate::debug::label;

    fn elem(name: &str, attrs: &[(&str, Option<&str>)]) -> Node {
        Node::Element {
            name: name.to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            children: Vec::new(),
        }
    }

    fn script(attrs: &[(&str, Option<&str>)]) -> Node {
        elem("script", attrs)
    }

    fn async_cdn_script(src: &str) -> Node {
        script(&[("async", None), ("src", Some(src))])
    }

    fn labels(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(label).collect()
    }

    #[test]
    fn meta_charset_first_wins_and_duplicates_are_dropped() {
        let buckets = classify_children(vec![
            elem("meta", &[("charset", Some("utf-8"))]),
            elem("meta", &[("charset", Some("latin-1"))]),
        ]);
        assert_eq!(
            buckets.meta_charset.as_ref().map(label).as_deref(),
            Some("<meta charset=\"utf-8\">")
        );
        assert!(buckets.meta_other.is_empty());
        assert!(buckets.other.is_empty());
    }

    #[test]
    fn meta_without_charset_goes_to_meta_other_in_order() {
        let buckets = classify_children(vec![
            elem("meta", &[("name", Some("viewport"))]),
            elem("meta", &[("property", Some("og:title"))]),
        ]);
        assert_eq!(
            labels(&buckets.meta_other),
            [
                "<meta name=\"viewport\">",
                "<meta property=\"og:title\">"
            ]
        );
    }

    #[test]
    fn extension_scripts_split_by_render_delaying_set() {
        let buckets = classify_children(vec![
            script(&[
                ("async", None),
                ("custom-element", Some("amp-story")),
                ("src", Some("https://cdn.ampproject.org/v0/amp-story-1.0.js")),
            ]),
            script(&[
                ("async", None),
                ("custom-element", Some("amp-experiment")),
            ]),
            script(&[
                ("async", None),
                ("custom-element", Some("amp-dynamic-css-classes")),
            ]),
            script(&[("async", None), ("custom-element", Some("amp-carousel"))]),
            script(&[("async", None), ("custom-template", Some("amp-mustache"))]),
            script(&[("async", None), ("host-service", Some("some-service"))]),
        ]);
        assert_eq!(buckets.script_render_delaying_extensions.len(), 3);
        assert_eq!(buckets.script_non_render_delaying_extensions.len(), 3);
    }

    #[test]
    fn extension_attr_outranks_engine_src() {
        // An extension script pointing at the engine URL is still an
        // extension script.
        let buckets = classify_children(vec![script(&[
            ("async", None),
            ("custom-element", Some("amp-story")),
            ("src", Some("https://cdn.ampproject.org/v0.js")),
        ])]);
        assert!(buckets.script_amp_engine.is_none());
        assert_eq!(buckets.script_render_delaying_extensions.len(), 1);
    }

    #[test]
    fn engine_script_matches_all_four_suffixes() {
        for src in [
            "https://cdn.ampproject.org/v0.js",
            "https://cdn.ampproject.org/v0.js.br",
            "https://cdn.ampproject.org/amp4ads-v0.js",
            "https://cdn.ampproject.org/amp4ads-v0.js.br",
            "https://cdn.ampproject.org/rtv/012345/v0.js",
        ] {
            let buckets = classify_children(vec![async_cdn_script(src)]);
            assert!(buckets.script_amp_engine.is_some(), "src {src}");
            assert!(buckets.other.is_empty(), "src {src}");
        }
    }

    #[test]
    fn later_engine_script_displaces_earlier_one() {
        let buckets = classify_children(vec![
            async_cdn_script("https://cdn.ampproject.org/v0.js"),
            async_cdn_script("https://cdn.ampproject.org/amp4ads-v0.js"),
        ]);
        assert_eq!(
            buckets.script_amp_engine.as_ref().map(label).as_deref(),
            Some("<script async src=\"https://cdn.ampproject.org/amp4ads-v0.js\">")
        );
        assert!(buckets.other.is_empty());
    }

    #[test]
    fn engine_match_requires_async_and_cdn_src() {
        let cases = [
            script(&[("src", Some("https://cdn.ampproject.org/v0.js"))]),
            async_cdn_script("https://example.com/v0.js"),
            async_cdn_script("https://cdn.ampproject.org/v1.js"),
            script(&[("async", None)]),
        ];
        let buckets = classify_children(cases.into());
        assert!(buckets.script_amp_engine.is_none());
        assert_eq!(buckets.other.len(), 4);
    }

    #[test]
    fn gmail_viewer_is_matched_before_generic_viewer() {
        let buckets = classify_children(vec![
            async_cdn_script(
                "https://cdn.ampproject.org/v0/amp-viewer-integration-gmail-0.1.js",
            ),
            async_cdn_script("https://cdn.ampproject.org/v0/amp-viewer-integration-0.1.js"),
            async_cdn_script("https://cdn.ampproject.org/viewer/google/v7.js"),
        ]);
        assert!(buckets.script_gmail_amp_viewer.is_some());
        // The generic integration script came last of the two viewer
        // matches, so it holds the slot.
        assert_eq!(
            buckets.script_amp_viewer.as_ref().map(label).as_deref(),
            Some("<script async src=\"https://cdn.ampproject.org/viewer/google/v7.js\">")
        );
    }

    #[test]
    fn google_viewer_requires_js_suffix() {
        let buckets = classify_children(vec![async_cdn_script(
            "https://cdn.ampproject.org/viewer/google/v7.txt",
        )]);
        assert!(buckets.script_amp_viewer.is_none());
        assert_eq!(buckets.other.len(), 1);
    }

    #[test]
    fn style_family_slots() {
        let buckets = classify_children(vec![
            elem("style", &[("amp-runtime", None)]),
            elem("style", &[("amp-custom", None)]),
            elem("style", &[("amp-boilerplate", None)]),
            elem("style", &[]),
        ]);
        assert!(buckets.style_amp_runtime.is_some());
        assert!(buckets.style_amp_custom.is_some());
        assert!(buckets.style_amp_boilerplate.is_some());
        assert_eq!(labels(&buckets.other), ["<style>"]);
    }

    #[test]
    fn amp4ads_boilerplate_shares_the_boilerplate_slot() {
        let buckets = classify_children(vec![elem("style", &[("amp4ads-boilerplate", None)])]);
        assert!(buckets.style_amp_boilerplate.is_some());
    }

    #[test]
    fn runtime_css_link_is_recognized() {
        let buckets = classify_children(vec![elem(
            "link",
            &[
                ("rel", Some("stylesheet")),
                ("href", Some("https://cdn.ampproject.org/rtv/012345/v0.css")),
            ],
        )]);
        assert!(buckets.link_stylesheet_runtime_css.is_some());
        assert!(buckets.link_stylesheets_before_amp_custom.is_empty());
    }

    #[test]
    fn stylesheet_before_amp_custom_survives_after_is_dropped() {
        let buckets = classify_children(vec![
            elem(
                "link",
                &[("rel", Some("stylesheet")), ("href", Some("/a.css"))],
            ),
            elem("style", &[("amp-custom", None)]),
            elem(
                "link",
                &[("rel", Some("stylesheet")), ("href", Some("/b.css"))],
            ),
        ]);
        assert_eq!(
            labels(&buckets.link_stylesheets_before_amp_custom),
            ["<link rel=\"stylesheet\" href=\"/a.css\">"]
        );
        // The late stylesheet is gone entirely, not demoted to `other`.
        assert!(buckets.other.is_empty());
    }

    #[test]
    fn stylesheet_without_href_still_buckets_by_custom_style_state() {
        let buckets = classify_children(vec![elem("link", &[("rel", Some("stylesheet"))])]);
        assert_eq!(buckets.link_stylesheets_before_amp_custom.len(), 1);
    }

    #[test]
    fn icon_rel_values_match_exactly() {
        let buckets = classify_children(vec![
            elem("link", &[("rel", Some("icon")), ("href", Some("/f.ico"))]),
            elem(
                "link",
                &[("rel", Some("icon shortcut")), ("href", Some("/f.ico"))],
            ),
            elem(
                "link",
                &[("rel", Some("shortcut icon")), ("href", Some("/f.ico"))],
            ),
            elem(
                "link",
                &[("rel", Some("Icon")), ("href", Some("/f.ico"))],
            ),
        ]);
        assert_eq!(buckets.link_icons.len(), 3);
        // rel matching is case-sensitive; "Icon" is not an icon rel.
        assert_eq!(labels(&buckets.other), ["<link rel=\"Icon\" href=\"/f.ico\">"]);
    }

    #[test]
    fn resource_hint_rel_is_the_literal_two_word_string() {
        let buckets = classify_children(vec![
            elem("link", &[("rel", Some("dns-prefetch preconnect"))]),
            elem("link", &[("rel", Some("preconnect dns-prefetch"))]),
            elem("link", &[("rel", Some("dns-prefetch"))]),
        ]);
        assert_eq!(buckets.link_resource_hints.len(), 1);
        assert_eq!(buckets.other.len(), 2);
    }

    #[test]
    fn link_without_rel_goes_to_other() {
        let buckets = classify_children(vec![elem("link", &[("href", Some("/x"))])]);
        assert_eq!(buckets.other.len(), 1);
    }

    #[test]
    fn noscript_takes_its_slot_only_once_in_output() {
        let buckets = classify_children(vec![
            elem("noscript", &[("id", Some("first"))]),
            elem("noscript", &[("id", Some("second"))]),
        ]);
        assert_eq!(
            buckets.noscript.as_ref().map(label).as_deref(),
            Some("<noscript id=\"second\">")
        );
        // The slot assignment must not leak a copy into `other`.
        assert!(buckets.other.is_empty());
    }

    #[test]
    fn text_and_comments_keep_order_in_other() {
        let buckets = classify_children(vec![
            Node::Text {
                text: "\n  ".to_string(),
            },
            elem("title", &[]),
            Node::Comment {
                text: "note".to_string(),
            },
        ]);
        assert_eq!(
            labels(&buckets.other),
            ["#text \"   \"", "<title>", "<!-- note -->"]
        );
    }

    #[test]
    fn uppercase_tag_names_classify_the_same() {
        let buckets = classify_children(vec![
            elem("META", &[("charset", Some("utf-8"))]),
            elem("NOSCRIPT", &[]),
        ]);
        assert!(buckets.meta_charset.is_some());
        assert!(buckets.noscript.is_some());
    }
}
