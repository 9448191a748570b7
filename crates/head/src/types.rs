//! DOM-lite node tree the head normalizer operates on.
//!
//! The tree arrives already parsed; this crate never tokenizes or serializes
//! HTML. Tag and attribute names match ASCII case-insensitively. Attribute
//! values are preserved and compared verbatim.

#[derive(Debug)]
pub enum Node {
    Document {
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    /// Attribute value by name (ASCII case-insensitive on the name).
    ///
    /// Returns `None` when the attribute is absent or valueless; presence
    /// tests that must accept bare attributes such as `async` go through
    /// [`Node::has_attr`].
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    /// Attribute presence test; `true` for valueless attributes.
    pub fn has_attr(&self, name: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
            }
            _ => false,
        }
    }

    /// ASCII case-insensitive element-name test. `false` for non-elements.
    pub fn tag_is(&self, tag: &str) -> bool {
        match self {
            Node::Element { name, .. } => name.eq_ignore_ascii_case(tag),
            _ => false,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }
}
