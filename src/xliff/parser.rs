use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::node::{Attributes, Element, Node, Text};
use crate::errors::DocumentError;

/// Parse XML text into a document tree.
///
/// Whitespace-only text is kept as ordinary text nodes; the serializer relies
/// on it to reproduce the original layout.
pub fn parse(xml: &str) -> Result<Node, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut top_level: Vec<Node> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let malformed = |message: String| DocumentError::Malformed { position, message };

        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(element_from_start(&start, false).map_err(malformed)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start, true).map_err(malformed)?;
                append(&mut stack, &mut top_level, Node::Element(element));
            }
            Ok(Event::End(end)) => {
                let element = stack.pop().ok_or_else(|| {
                    DocumentError::UnexpectedClosingTag(
                        String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    )
                })?;
                append(&mut stack, &mut top_level, Node::Element(element));
            }
            Ok(Event::Text(text)) => {
                let raw = String::from_utf8_lossy(&text).into_owned();
                let value = text.unescape().map_err(|e| malformed(e.to_string()))?;
                append(&mut stack, &mut top_level, Node::Text(Text::from_source(value, raw)));
            }
            Ok(Event::CData(data)) => {
                let data = String::from_utf8_lossy(&data).into_owned();
                append(&mut stack, &mut top_level, Node::CData(data));
            }
            Ok(Event::Comment(comment)) => {
                let comment = String::from_utf8_lossy(&comment).into_owned();
                append(&mut stack, &mut top_level, Node::Comment(comment));
            }
            Ok(Event::Decl(declaration)) => {
                let declaration = String::from_utf8_lossy(&declaration).into_owned();
                append(&mut stack, &mut top_level, Node::Declaration(declaration));
            }
            Ok(Event::PI(instruction)) => {
                let instruction = String::from_utf8_lossy(&instruction).into_owned();
                append(&mut stack, &mut top_level, Node::ProcessingInstruction(instruction));
            }
            Ok(Event::DocType(doctype)) => {
                let doctype = String::from_utf8_lossy(&doctype).into_owned();
                append(&mut stack, &mut top_level, Node::DocType(doctype));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(e.to_string())),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DocumentError::UnclosedElement(open.name));
    }
    if !top_level.iter().any(|node| matches!(node, Node::Element(_))) {
        return Err(DocumentError::MissingRoot);
    }

    Ok(Node::Document(top_level))
}

fn element_from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut entries = Vec::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        entries.push((key, value.into_owned()));
    }

    // Everything after the name, as written
    let content: &[u8] = start;
    let name_len = start.name().as_ref().len();
    let raw = String::from_utf8_lossy(&content[name_len..]).into_owned();

    Ok(Element {
        name,
        attributes: Attributes::from_source(entries, raw),
        children: Vec::new(),
        self_closing,
    })
}

fn append(stack: &mut [Element], top_level: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}
