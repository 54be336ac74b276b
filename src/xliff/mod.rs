/*!
 * XLIFF document model.
 *
 * This module owns the document tree the translator works on:
 *
 * - `node`: elements, text leaves and the other XML node types
 * - `version`: 1.x / 2.0 detection and per-version element naming
 * - `parser`: XML text to tree (quick-xml reader)
 * - `serializer`: tree back to XML text (quick-xml writer)
 */

pub mod node;
pub mod parser;
pub mod serializer;
pub mod version;

pub use self::node::{Attributes, Element, Node, Text, local_name, text_leaves_mut};
pub use self::version::{NodeKind, XliffVersion};

use crate::errors::DocumentError;

/// A parsed XLIFF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XliffDocument {
    root: Node,
}

impl XliffDocument {
    /// Parse XLIFF text
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        Ok(Self {
            root: parser::parse(xml)?,
        })
    }

    /// Serialize the document back to XML text
    pub fn to_xml(&self) -> Result<String, DocumentError> {
        serializer::serialize(&self.root)
    }

    /// Document root node (always `Node::Document`)
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// The top-level `<xliff>` element
    pub fn root_element(&self) -> Option<&Element> {
        match &self.root {
            Node::Document(children) => children.iter().find_map(Node::as_element),
            _ => None,
        }
    }

    /// Format version declared on the root element
    pub fn version(&self) -> XliffVersion {
        match &self.root {
            Node::Document(children) => XliffVersion::detect(children),
            _ => XliffVersion::V1,
        }
    }

    /// All translatable units of the document in document order
    pub fn units(&self) -> Vec<&Element> {
        let version = self.version();
        let mut units = Vec::new();
        if let Some(root) = self.root_element() {
            collect_units(root, version, &mut units);
        }
        units
    }
}

fn collect_units<'a>(element: &'a Element, version: XliffVersion, out: &mut Vec<&'a Element>) {
    for child in element.children.iter().filter_map(Node::as_element) {
        if version.classify_element(child) == NodeKind::Unit {
            out.push(child);
        } else {
            collect_units(child, version, out);
        }
    }
}
