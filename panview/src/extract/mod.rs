//! Conversion of PAN-OS `entry` elements into domain records.
//!
//! Every category implements [`FromEntry`], naming the container it lives
//! under relative to a scope root and building itself from one named entry.
//! The loop in [`extract_entries`] applies the skip rules uniformly: entries
//! without a `name` are dropped silently, entries that fail construction are
//! logged and dropped.

pub mod device_groups;
pub mod objects;
pub mod profiles;
pub mod rules;
pub mod templates;

use panview_xml::{NodePath, XmlNode};
use thiserror::Error;
use tracing::warn;

/// A named entry that could not be turned into its domain record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {kind} entry '{name}': {reason}")]
pub struct MalformedEntry {
    pub kind: &'static str,
    pub name: String,
    pub reason: String,
}

impl MalformedEntry {
    pub fn new(kind: &'static str, name: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// A record built from one named `entry` element.
pub trait FromEntry: Sized {
    /// Human name used in log messages.
    const KIND: &'static str;
    /// Child path from a scope root (or rulebase) to the element holding the entries.
    const CONTAINER: &'static [&'static str];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry>;
}

/// Build every record below `root` at `T::CONTAINER`.
pub fn extract_from<T: FromEntry>(root: &NodePath<'_>) -> Vec<T> {
    match root.descend(T::CONTAINER) {
        Some(container) => extract_entries(&container),
        None => Vec::new(),
    }
}

/// Build a record from each immediate `entry` child of `container`.
pub fn extract_entries<T: FromEntry>(container: &NodePath<'_>) -> Vec<T> {
    let mut out = Vec::new();
    for entry in container.entries() {
        let Some(name) = entry.node().name().map(str::to_string) else {
            continue;
        };
        match T::from_entry(&entry, &name) {
            Ok(record) => out.push(record),
            Err(err) => warn!(xpath = %entry.xpath(), "skipping entry: {err}"),
        }
    }
    out
}

/// Count every `entry` child below `root` at `path`, named or not.
pub fn count_entries(root: &XmlNode, path: &[&str]) -> usize {
    root.descend(path)
        .map(|container| container.entries().count())
        .unwrap_or(0)
}

/// Trimmed, non-empty text at `path`.
pub fn text(node: &XmlNode, path: &[&str]) -> Option<String> {
    node.get_text(path)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// A `<tag><member>..</member></tag>` list; missing means empty.
pub fn members(node: &XmlNode, path: &[&str]) -> Vec<String> {
    node.descend(path)
        .map(XmlNode::member_texts)
        .unwrap_or_default()
}

/// Names of the `entry` children at `path`.
pub fn entry_names(node: &XmlNode, path: &[&str]) -> Vec<String> {
    node.descend(path)
        .map(|container| {
            container
                .entries()
                .filter_map(|entry| entry.name().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// A `yes`/`no` element; anything else reads as absent.
pub fn yes_no(node: &XmlNode, path: &[&str]) -> Option<bool> {
    match node.get_text(path).map(str::trim) {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}

/// Element holding either text or a single empty child naming the value,
/// as in `<action>allow</action>` or `<action><reset-both/></action>`.
pub fn text_or_choice(node: &XmlNode, path: &[&str]) -> Option<String> {
    let element = node.descend(path)?;
    if let Some(value) = text(element, &[]) {
        return Some(value);
    }
    element.children.first().map(|child| child.tag.clone())
}
