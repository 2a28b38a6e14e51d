use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// An owned XML element with its attributes, child elements and text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Non-blank text content, if any.
    pub text: Option<String>,
}

impl XmlNode {
    /// Create a new XML node with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Builder-style attribute setter, mostly useful in tests.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Return an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Return the `name` attribute, which PAN-OS uses as the identity of every `entry`.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    /// Return the first child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Return all children with the provided tag.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }

    /// Walk nested child tags and return the node at the end of the path.
    pub fn descend(&self, path: &[&str]) -> Option<&XmlNode> {
        let mut current = self;
        for segment in path {
            current = current.get_child(segment)?;
        }
        Some(current)
    }

    /// Walk a nested child path and return terminal node text if found.
    pub fn get_text<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        self.descend(path)?.text.as_deref()
    }

    /// Iterate immediate `entry` children.
    pub fn entries(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter(|child| child.tag == "entry")
    }

    /// Find the immediate `entry` child carrying `name`.
    pub fn entry_named(&self, name: &str) -> Option<&XmlNode> {
        self.entries().find(|entry| entry.name() == Some(name))
    }

    /// Collect the text of every child element, in order.
    ///
    /// This is the shape of a PAN-OS member list: `<tag><member>a</member><member>b</member></tag>`.
    /// Children without text are skipped.
    pub fn member_texts(&self) -> Vec<String> {
        self.children
            .iter()
            .filter_map(|child| child.text.as_deref())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, value)?;
        }

        if self.children.is_empty() && self.text.is_none() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        if let Some(text) = &self.text {
            write!(f, "{}", text)?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
