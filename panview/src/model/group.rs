use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

/// An address group.
///
/// `static_members` is `Some(vec![])` for a present but empty `<static/>`.
/// A group may carry both a static list and a dynamic filter; both are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressGroup {
    pub name: String,
    #[serde(rename = "static")]
    pub static_members: Option<Vec<String>>,
    #[serde(rename = "dynamic")]
    pub dynamic_filter: Option<String>,
    pub description: Option<String>,
    pub tag: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl AddressGroup {
    /// Static members, or an empty slice for purely dynamic groups.
    pub fn members(&self) -> &[String] {
        self.static_members.as_deref().unwrap_or(&[])
    }

    /// `static`, `dynamic`, or `None` when neither is defined.
    pub fn group_type(&self) -> Option<&'static str> {
        if self.static_members.is_some() {
            Some("static")
        } else if self.dynamic_filter.is_some() {
            Some("dynamic")
        } else {
            None
        }
    }
}

impl Located for AddressGroup {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for AddressGroup {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "static" => self
                .static_members
                .as_ref()
                .map(FieldValue::from)
                .unwrap_or(FieldValue::Null),
            "dynamic" => FieldValue::from(&self.dynamic_filter),
            "type" => self.group_type().map(FieldValue::text).unwrap_or(FieldValue::Null),
            "description" => FieldValue::from(&self.description),
            "tag" => FieldValue::from(&self.tag),
            _ => self.location.read_field(name),
        }
    }
}

/// A service group. Construction requires at least one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceGroup {
    pub name: String,
    pub members: Vec<String>,
    pub tag: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl Located for ServiceGroup {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for ServiceGroup {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "members" => FieldValue::from(&self.members),
            "tag" => FieldValue::from(&self.tag),
            _ => self.location.read_field(name),
        }
    }
}
