use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while serializing an [`XmlNode`] subtree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Serialized bytes were not valid UTF-8.
    #[error("serialized XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a subtree as indented XML text, without an XML declaration.
///
/// Used to show the raw configuration behind one extracted object.
pub fn to_xml_string(node: &XmlNode) -> Result<String, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_node(&mut writer, node)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::to_xml_string;
    use crate::parse;

    #[test]
    fn serializes_entry_with_escaped_text() {
        let root = parse(br#"<entry name="web"><description>a &lt; b</description><tag/></entry>"#)
            .expect("parse");
        let xml = to_xml_string(&root).expect("write");

        assert!(xml.starts_with(r#"<entry name="web">"#));
        assert!(xml.contains("<description>a &lt; b</description>"));
        assert!(xml.contains("<tag/>"));
    }
}
