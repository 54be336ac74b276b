/*!
 * In-memory XLIFF document tree.
 *
 * The tree keeps every node the reader produced (prolog, comments, whitespace)
 * so that parts of the document the translator never touches are written back
 * unchanged.
 */

/// Ordered attribute list of an element
///
/// Lookups are by name. The attribute text of the start tag is kept as it was
/// read (quotes, entities, spacing) and reused on output until a value
/// actually changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
    raw: Option<String>,
}

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute list read from a start tag; `raw` is the tag text after the element name
    pub fn from_source(entries: Vec<(String, String)>, raw: impl Into<String>) -> Self {
        Self {
            entries,
            raw: Some(raw.into()),
        }
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) if *existing == value => return,
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
        self.raw = None;
    }

    /// Remove an attribute, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        self.raw = None;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over `(name, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Start-tag text as read, while no attribute has changed
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            raw: None,
        }
    }
}

/// An XML element with its attributes and children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written in the document (may carry a prefix)
    pub name: String,

    /// Element attributes
    pub attributes: Attributes,

    /// Child nodes in document order
    pub children: Vec<Node>,

    /// Whether the element was written as `<name/>`
    pub self_closing: bool,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Element name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Index of the first child element with the given local name
    pub fn position_of(&self, local: &str) -> Option<usize> {
        self.children.iter().position(|child| {
            child
                .as_element()
                .is_some_and(|element| element.local_name() == local)
        })
    }

    /// First child element with the given local name
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.position_of(local)
            .and_then(|index| self.children[index].as_element())
    }

    /// Mutable access to the first child element with the given local name
    pub fn child_mut(&mut self, local: &str) -> Option<&mut Element> {
        let index = self.position_of(local)?;
        self.children[index].as_element_mut()
    }

    /// Iterate over child elements with the given local name
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(move |element| element.local_name() == local)
    }

    /// Concatenated text of every descendant text node
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Number of text leaves anywhere below this element
    pub fn text_leaf_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Text(_) => 1,
                Node::Element(element) => element.text_leaf_count(),
                _ => 0,
            })
            .sum()
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::Element(element) => collect_text(&element.children, out),
            _ => {}
        }
    }
}

/// Collect exclusive borrows of every text leaf below `nodes`, in document order
pub fn text_leaves_mut<'d>(nodes: &'d mut [Node]) -> Vec<&'d mut String> {
    let mut leaves = Vec::new();
    push_text_leaves(nodes, &mut leaves);
    leaves
}

fn push_text_leaves<'d>(nodes: &'d mut [Node], out: &mut Vec<&'d mut String>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push(&mut text.value),
            Node::Element(element) => push_text_leaves(&mut element.children, out),
            _ => {}
        }
    }
}

/// Strip a namespace prefix from a qualified name
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Character data: the unescaped value plus the escaped text it was read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    raw: Option<String>,
}

impl Text {
    /// Text created in memory, escaped on output
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: None,
        }
    }

    /// Text read from a document, `raw` being its escaped form
    pub fn from_source(value: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: Some(raw.into()),
        }
    }

    /// Escaped text as read from the document
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Document root holding the prolog and the root element
    Document(Vec<Node>),

    /// An element
    Element(Element),

    /// Character data
    Text(Text),

    /// `<![CDATA[...]]>` content
    CData(String),

    /// Comment body, stored as written
    Comment(String),

    /// `<?xml ...?>` declaration content
    Declaration(String),

    /// Processing instruction content
    ProcessingInstruction(String),

    /// `<!DOCTYPE ...>` content
    DocType(String),
}

impl Node {
    /// Shorthand for a text leaf
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.value),
            _ => None,
        }
    }

    /// True for text nodes made only of whitespace
    pub fn is_whitespace(&self) -> bool {
        self.as_text().is_some_and(|text| text.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
