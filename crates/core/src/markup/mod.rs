//! Markup tree plus the matched parse/serialize pair for both fidelity modes.

mod faithful;
mod permissive;
mod serialize;

use crate::MalformedMarkupError;
use serde::{Deserialize, Serialize};

pub use serialize::{serialize_element, serialize_node};

/// Parse/serialize fidelity mode, fixed once per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// Tolerant HTML parsing; never fails, normalizes on the way in and out.
    #[default]
    Permissive,
    /// Well-formed XML-style parsing that round-trips attribute text,
    /// self-closing tags and namespace prefixes verbatim.
    Faithful,
}

/// Quote character wrapping an attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quote {
    /// `name="value"`
    #[default]
    Double,
    /// `name='value'`
    Single,
}

impl Quote {
    pub(crate) fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

/// A single element attribute.
///
/// In faithful mode `value` holds the raw, still-escaped source text; in
/// permissive mode it holds the decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name (`xlink:href`, `class`, ...).
    pub name: String,
    /// Attribute value.
    pub value: String,
    /// Quote style used when serializing in faithful mode.
    pub quote: Quote,
    /// Whitespace preceding the attribute in the start tag, `None` for a single space.
    pub leading: Option<String>,
    /// Raw text between the name and the opening quote, `None` for a bare `=`.
    pub separator: Option<String>,
}

impl Attribute {
    /// Create a double-quoted attribute separated by a single space.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote: Quote::Double,
            leading: None,
            separator: None,
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified tag name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
    /// Written as `<name/>` in the source (faithful mode only).
    pub self_closing: bool,
    /// Whitespace between the last attribute and the tag close, if any.
    pub trailing: Option<String>,
    /// Whitespace between the name and `>` of the end tag, if any.
    pub end_trailing: Option<String>,
}

impl Element {
    /// Create an empty element with explicit start and end tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute value by exact name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute with this exact name is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Iterate over element children, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element node.
    Element(Element),
    /// Text node (raw in faithful mode, decoded in permissive mode).
    Text(String),
    /// Comment body without the `<!--`/`-->` delimiters.
    Comment(String),
    /// CDATA section body (faithful mode only).
    CData(String),
}

impl Node {
    /// Borrow the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether this node is text consisting only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// A parsed fragment: a synthetic root owning the top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Mode the document was parsed with; serialization reuses it.
    pub mode: MarkupMode,
    /// Top-level nodes in document order.
    pub nodes: Vec<Node>,
}

impl Document {
    /// Number of top-level element nodes.
    pub fn top_level_element_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Element(_)))
            .count()
    }

    /// Serialize every top-level node with the document's own mode.
    pub fn serialize(&self) -> String {
        self.nodes
            .iter()
            .map(|node| serialize_node(node, self.mode))
            .collect()
    }
}

/// Parse a markup fragment in the given mode.
///
/// # Errors
///
/// Returns [`MalformedMarkupError`] when `mode` is [`MarkupMode::Faithful`]
/// and the input is not well-formed. Permissive parsing never fails.
pub fn parse(text: &str, mode: MarkupMode) -> Result<Document, MalformedMarkupError> {
    let nodes = match mode {
        MarkupMode::Permissive => permissive::parse_fragment(text),
        MarkupMode::Faithful => faithful::parse_fragment(text)?,
    };
    Ok(Document { mode, nodes })
}
