use std::{fmt::Display, str::FromStr};

use super::parse_document;

/// A node of an [`Element`]'s content
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// Character data
    Text(String),
}

/// A minimal document element: a name, attributes and child nodes
///
/// Masks serialize into an element owned by the caller (see [`crate::BitGridMask::to_xml`]).
/// The element renders as XML through [`Display`] and parses back through [`FromStr`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or content
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.add_text(text);
        element
    }

    pub(crate) fn from_parts(
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            name,
            attributes,
            children,
        }
    }

    /// The element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name`, if present
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets the attribute `name`, replacing an existing value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Appends a child element
    pub fn add_child(&mut self, child: Self) {
        self.children.push(Node::Element(child));
    }

    /// Appends a text node
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// All child nodes, in document order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, in document order
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element called `name`
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().find(|child| child.name == name)
    }

    /// Concatenated text content of this element (not of its descendants)
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{}\"", escape(value))?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        for node in &self.children {
            match node {
                Node::Element(element) => write!(f, "{element}")?,
                Node::Text(text) => write!(f, "{}", escape(text))?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

impl FromStr for Element {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_document(s)
    }
}
