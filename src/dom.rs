//! Document tree for parsed HTML fragments.
//!
//! A fragment is an ordered forest: `Vec<Node>`. Text and attribute values are kept
//! exactly as spelled in the source, entities included.

use crate::scan;

/// A node in a fragment tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Comment body, without the `<!--` / `-->` delimiters.
    Comment(String),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as spelled in the start tag.
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Written as `<name/>` in the source.
    pub self_closing: bool,
}

/// A single attribute. `value` is `None` for bare attributes such as `hidden`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value: value.map(str::to_owned),
        });
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by name (ASCII case-insensitive).
    /// Bare attributes yield `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn is_void(&self) -> bool {
        scan::is_void(self.name.as_bytes())
    }

    pub fn is_raw_text(&self) -> bool {
        scan::is_raw_text(self.name.as_bytes())
    }

    /// Same element with a different set of children.
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Self {
        Element {
            name: self.name.clone(),
            attrs: self.attrs.clone(),
            children,
            self_closing: self.self_closing,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}
