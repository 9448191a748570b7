//! Fixture loading and diff support for head-reorder tests.
//!
//! Golden cases live in TOML files: each case names its input head children
//! and the expected child labels after reordering. Labels use the same
//! format as `head::debug::label`, so expectations are written exactly as
//! the library would print them.

use std::fs;
use std::path::Path;

use head::Node;
use head::debug::head_outline;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CaseFile {
    #[serde(rename = "case")]
    pub cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
pub struct Case {
    pub name: String,
    #[serde(default)]
    pub input: Vec<ChildSpec>,
    pub expected: Vec<String>,
}

/// One head child in a fixture: an element (`tag` + `attrs`), a text node
/// (`text`), or a comment (`comment`). Exactly one of the three.
#[derive(Debug, Deserialize)]
pub struct ChildSpec {
    pub tag: Option<String>,
    #[serde(default)]
    pub attrs: Vec<AttrSpec>,
    pub text: Option<String>,
    pub comment: Option<String>,
}

/// Fixture attribute; omit `value` for bare attributes such as `async`.
#[derive(Debug, Deserialize)]
pub struct AttrSpec {
    pub name: String,
    pub value: Option<String>,
}

pub fn load_case_file(path: &Path) -> CaseFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
    toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"))
}

/// Build a `<head>` element from fixture child specs.
pub fn build_head(children: &[ChildSpec]) -> Node {
    Node::Element {
        name: "head".to_string(),
        attributes: Vec::new(),
        children: children.iter().map(build_child).collect(),
    }
}

pub fn build_child(spec: &ChildSpec) -> Node {
    match (&spec.tag, &spec.text, &spec.comment) {
        (Some(tag), None, None) => Node::Element {
            name: tag.clone(),
            attributes: spec
                .attrs
                .iter()
                .map(|attr| (attr.name.clone(), attr.value.clone()))
                .collect(),
            children: Vec::new(),
        },
        (None, Some(text), None) => Node::Text { text: text.clone() },
        (None, None, Some(comment)) => Node::Comment {
            text: comment.clone(),
        },
        _ => panic!("fixture child must set exactly one of tag/text/comment: {spec:?}"),
    }
}

/// Labels for each direct child of `head`, in order.
pub fn labels(head: &Node) -> Vec<String> {
    head_outline(head)
}

/// Render the first mismatch between expected and actual label sequences
/// with a little surrounding context, for readable golden failures.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let missing = "<missing>";
    let max = expected.len().max(actual.len());
    let mismatch = (0..max).find(|&i| {
        expected.get(i).map(String::as_str).unwrap_or(missing)
            != actual.get(i).map(String::as_str).unwrap_or(missing)
    });

    let mut out = String::new();
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(&mut out, "first mismatch at line {}:", i + 1);
        for line in start..end {
            let left = expected.get(line).map(String::as_str).unwrap_or(missing);
            let right = actual.get(line).map(String::as_str).unwrap_or(missing);
            let marker = if line == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>3}  expected: {left}", line + 1);
            let _ = writeln!(&mut out, "{marker} {:>3}    actual: {right}", line + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}
