//! Logiqx XML dialect: canonical tree reader and writer.

use std::io::{BufRead, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::DatError;
use crate::tree::DatNode;

/// DOCTYPE declared by Logiqx-style DAT files.
pub const LOGIQX_DOCTYPE: &str = r#"datafile PUBLIC "-//Logiqx//DTD ROM Management Datafile//EN" "http://www.logiqx.com/Dats/datafile.dtd""#;

/// Serialize a canonical tree as Logiqx-style XML.
///
/// Nodes with neither text nor children become empty elements
/// (`<rom name="..."/>`), text-only nodes become leaves.
pub fn write_xml<W: Write>(tree: &DatNode, out: W) -> Result<(), DatError> {
    let mut writer = Writer::new_with_indent(out, b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(LOGIQX_DOCTYPE)))?;
    write_node(&mut writer, tree)
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &DatNode) -> Result<(), DatError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(ref text) = node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

/// Parse Logiqx-style XML into the canonical tree.
pub fn parse_xml<R: BufRead>(reader: R) -> Result<DatNode, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<DatNode> = Vec::new();
    let mut root: Option<DatNode> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                stack.push(node_from_start(e)?);
            }
            Event::Empty(ref e) => {
                let node = node_from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.push(node),
                    None => root = Some(node),
                }
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text = Some(e.unescape()?.to_string());
                }
            }
            Event::End(_) => {
                if let Some(done) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.push(done),
                        None => root = Some(done),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| DatError::invalid_dat("no root element found"))
}

fn node_from_start(e: &BytesStart<'_>) -> Result<DatNode, DatError> {
    let mut node = DatNode::new(String::from_utf8_lossy(e.name().as_ref()).to_string());
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.to_string();
        node.attrs.push((key, value));
    }
    Ok(node)
}
