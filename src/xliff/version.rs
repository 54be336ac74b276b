use std::fmt;

use super::node::{Element, Node};

/// Structural role of a node, as seen by the document walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    /// v1 `<file>` or v2 `<xliff>`: carries the target language
    File,
    /// v1 `<trans-unit>` or v2 `<unit>`
    Unit,
    /// v2 `<segment>`
    Segment,
    Source,
    Target,
    Text,
    Other,
}

/// XLIFF format generation, fixed once per document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XliffVersion {
    /// XLIFF 1.x (`trans-unit`, state on `target`)
    V1,
    /// XLIFF 2.0 (`unit`/`segment`, state on `segment`)
    V2,
}

impl XliffVersion {
    /// Pick the version from the root element's `version` attribute.
    ///
    /// Only `"2.0"` selects v2; anything else, including a missing attribute,
    /// is read as 1.x.
    pub fn from_attribute(version: Option<&str>) -> Self {
        match version.map(str::trim) {
            Some("2.0") => Self::V2,
            _ => Self::V1,
        }
    }

    /// Detect the version from the top-level nodes of a document
    pub fn detect(top_level: &[Node]) -> Self {
        let root = top_level.iter().find_map(Node::as_element);
        Self::from_attribute(root.and_then(|element| element.attribute("version")))
    }

    /// Element that receives the target-language stamp
    pub fn file_element(self) -> &'static str {
        match self {
            Self::V1 => "file",
            Self::V2 => "xliff",
        }
    }

    /// Name of the translatable unit container
    pub fn unit_element(self) -> &'static str {
        match self {
            Self::V1 => "trans-unit",
            Self::V2 => "unit",
        }
    }

    /// Attribute holding the target language on the file element
    pub fn target_language_attribute(self) -> &'static str {
        match self {
            Self::V1 => "target-language",
            Self::V2 => "trgLang",
        }
    }

    /// Classify an element for this version
    pub fn classify_element(self, element: &Element) -> NodeKind {
        let name = element.local_name();
        if name == self.file_element() {
            NodeKind::File
        } else if name == self.unit_element() {
            NodeKind::Unit
        } else {
            match (self, name) {
                (Self::V2, "segment") => NodeKind::Segment,
                (_, "source") => NodeKind::Source,
                (_, "target") => NodeKind::Target,
                _ => NodeKind::Other,
            }
        }
    }

    /// Classify any node for this version
    pub fn classify(self, node: &Node) -> NodeKind {
        match node {
            Node::Document(_) => NodeKind::Root,
            Node::Element(element) => self.classify_element(element),
            Node::Text(_) => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }
}

impl fmt::Display for XliffVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "XLIFF 1.x"),
            Self::V2 => write!(f, "XLIFF 2.0"),
        }
    }
}
