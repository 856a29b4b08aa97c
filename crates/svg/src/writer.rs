//! Serialization of element trees through quick-xml.

use crate::element::Element;
use crate::error::SvgError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Write a complete, indented XML document rooted at `root`.
///
/// Elements with mixed content (text interleaved with child elements) are
/// written without indentation inside them, so that whitespace-preserving
/// SVG text is not disturbed.
pub fn to_xml_string(root: &Element) -> Result<String, SvgError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    write_element(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

fn start_tag(element: &Element) -> BytesStart<'_> {
    let mut start = BytesStart::new(element.name.as_str());
    for (k, v) in element.attributes() {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    start
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), SvgError> {
    if element.has_mixed_content() {
        let inner = inline_content(element)?;
        writer.write_event(Event::Start(start_tag(element)))?;
        writer.write_event(Event::Text(BytesText::from_escaped(inner)))?;
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    } else if element.children.is_empty() {
        writer.write_event(Event::Empty(start_tag(element)))?;
    } else {
        writer.write_event(Event::Start(start_tag(element)))?;
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }
    Ok(())
}

fn inline_content(element: &Element) -> Result<String, SvgError> {
    let mut writer = Writer::new(Vec::new());
    write_inline_children(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_inline_children<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
) -> Result<(), SvgError> {
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        if child.children.is_empty() && child.text.is_none() {
            writer.write_event(Event::Empty(start_tag(child)))?;
        } else {
            writer.write_event(Event::Start(start_tag(child)))?;
            write_inline_children(writer, child)?;
            writer.write_event(Event::End(BytesEnd::new(child.name.as_str())))?;
        }
        if let Some(tail) = &child.tail {
            writer.write_event(Event::Text(BytesText::new(tail)))?;
        }
    }
    Ok(())
}
