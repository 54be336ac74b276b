use std::io::Write;

use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::node::{Element, Node, Text};
use crate::errors::DocumentError;

/// Write a document tree back to XML text.
///
/// Text and start tags that still match what was read are written from their
/// original escaped form. Anything changed in memory is escaped afresh:
/// attribute values fully (`<`, `>`, `&` and quotes), text content only for
/// `<`, `>` and `&` so apostrophes and quotes in translations stay readable.
pub fn serialize(root: &Node) -> Result<String, DocumentError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| DocumentError::Serialize(e.to_string()))
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), DocumentError> {
    match node {
        Node::Document(children) => {
            for child in children {
                write_node(writer, child)?;
            }
            Ok(())
        }
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) => emit(writer, Event::Text(escaped_text(text))),
        Node::CData(data) => emit(writer, Event::CData(BytesCData::new(data.as_str()))),
        Node::Comment(comment) => emit(writer, Event::Comment(BytesText::from_escaped(comment.as_str()))),
        Node::Declaration(declaration) => emit(
            writer,
            Event::Decl(BytesDecl::from_start(BytesStart::from_content(declaration.as_str(), 3))),
        ),
        Node::ProcessingInstruction(instruction) => {
            emit(writer, Event::PI(BytesPI::new(instruction.as_str())))
        }
        Node::DocType(doctype) => emit(writer, Event::DocType(BytesText::from_escaped(doctype.as_str()))),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), DocumentError> {
    let start = match element.attributes.raw() {
        Some(raw) => BytesStart::from_content(format!("{}{}", element.name, raw), element.name.len()),
        None => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in element.attributes.iter() {
                start.push_attribute((key, value));
            }
            start
        }
    };

    if element.children.is_empty() && element.self_closing {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

/// Original escaped text when it still decodes to the current value
fn escaped_text(text: &Text) -> BytesText<'_> {
    let unchanged = text
        .raw()
        .filter(|raw| unescape(raw).is_ok_and(|decoded| decoded == text.value));
    match unchanged {
        Some(raw) => BytesText::from_escaped(raw),
        None => BytesText::from_escaped(partial_escape(text.value.as_str())),
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), DocumentError> {
    writer
        .write_event(event)
        .map_err(|e| DocumentError::Serialize(e.to_string()))
}
