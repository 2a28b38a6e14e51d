use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input file does not exist.
    #[error("XML file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in the document, with the byte offset it was detected at.
    #[error("malformed XML at byte {offset}: {message}")]
    Malformed { offset: u64, message: String },
}

/// Parse XML bytes into an [`XmlNode`] tree.
///
/// Whitespace-only text is dropped; text split by CDATA sections or
/// comments is concatenated onto the owning element.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();

    loop {
        let offset = reader.buffer_position() as u64;
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => builder.open(start_node(&e, &reader)?),
            Event::Empty(e) => builder.attach(start_node(&e, &reader)?, offset)?,
            Event::Text(e) => builder.append_text(&e.unescape()?),
            Event::CData(e) => builder.append_text(std::str::from_utf8(e.as_ref())?),
            Event::End(_) => builder.close(offset)?,
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    builder.finish(reader.buffer_position() as u64)
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ParseError::NotFound(path.to_path_buf()),
        _ => ParseError::Io(err),
    })?;
    parse(&bytes)
}

/// Stack of open elements plus the finished root.
#[derive(Default)]
struct TreeBuilder {
    open: Vec<XmlNode>,
    root: Option<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, node: XmlNode) {
        self.open.push(node);
    }

    fn close(&mut self, offset: u64) -> Result<(), ParseError> {
        let node = self
            .open
            .pop()
            .ok_or_else(|| malformed(offset, "closing tag without open tag"))?;
        self.attach(node, offset)
    }

    fn attach(&mut self, node: XmlNode, offset: u64) -> Result<(), ParseError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(malformed(offset, "multiple top-level elements found"));
        }
        self.root = Some(node);
        Ok(())
    }

    fn append_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let Some(current) = self.open.last_mut() else {
            return;
        };
        match &mut current.text {
            Some(existing) => existing.push_str(text),
            None => current.text = Some(text.to_string()),
        }
    }

    fn finish(self, offset: u64) -> Result<XmlNode, ParseError> {
        if let Some(unclosed) = self.open.last() {
            return Err(malformed(
                offset,
                &format!("unclosed element <{}> at end of document", unclosed.tag),
            ));
        }
        self.root
            .ok_or_else(|| malformed(offset, "no root element found"))
    }
}

fn malformed(offset: u64, message: &str) -> ParseError {
    ParseError::Malformed {
        offset,
        message: message.to_string(),
    }
}

fn start_node(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::new(qname_to_string(e.name())?);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse, ParseError};

    #[test]
    fn keeps_attributes_and_trims_whitespace_text() {
        let root = parse(
            br#"<config version="10.2.0">
                  <shared>
                    <address><entry name="a&amp;b"><fqdn>x.example.com</fqdn></entry></address>
                  </shared>
                </config>"#,
        )
        .expect("parse");

        assert_eq!(root.attr("version"), Some("10.2.0"));
        let entry = root
            .descend(&["shared", "address", "entry"])
            .expect("entry");
        assert_eq!(entry.name(), Some("a&b"));
        assert_eq!(entry.get_text(&["fqdn"]), Some("x.example.com"));
        assert!(root.text.is_none());
    }

    #[test]
    fn reports_unclosed_elements() {
        let err = parse(b"<config><shared></config>").expect_err("should fail");
        assert!(matches!(
            err,
            ParseError::Malformed { .. } | ParseError::Xml(_)
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse(b"   ").expect_err("should fail");
        assert!(matches!(err, ParseError::Malformed { .. }));
    }
}
