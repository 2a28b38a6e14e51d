//! Scope resolution and the location metadata carried by every object.
//!
//! PAN-OS reuses the `entry` element at every nesting depth. The scope an
//! object belongs to is decided by walking upward from its `entry` until the
//! first boundary element (`device-group`, `template` or `vsys`) whose
//! on-path child is a named `entry`. The first boundary wins, so an address
//! inside `template/entry/config/devices/entry/vsys/entry` belongs to the
//! vsys, not to the template.

use std::fmt;

use panview_xml::NodePath;
use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};

/// The configuration scope an object was defined in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Shared,
    DeviceGroup(String),
    Template(String),
    Vsys(String),
}

impl Scope {
    /// Classifier name used by the `location` filter field.
    pub fn kind(&self) -> &'static str {
        match self {
            Scope::Shared => "shared",
            Scope::DeviceGroup(_) => "device-group",
            Scope::Template(_) => "template",
            Scope::Vsys(_) => "vsys",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Scope::Shared => None,
            Scope::DeviceGroup(name) | Scope::Template(name) | Scope::Vsys(name) => Some(name),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}:{}", self.kind(), name),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Resolve the scope of the element at `path` by walking its ancestors.
pub fn resolve_scope(path: &NodePath<'_>) -> Scope {
    for (ancestor, on_path) in path.links_upward() {
        let boundary: fn(String) -> Scope = match ancestor.tag.as_str() {
            "device-group" => Scope::DeviceGroup,
            "template" => Scope::Template,
            "vsys" => Scope::Vsys,
            _ => continue,
        };
        if on_path.tag != "entry" {
            continue;
        }
        if let Some(name) = on_path.name() {
            return boundary(name.to_string());
        }
    }
    Scope::Shared
}

/// Document position plus the single parent scope of an object.
///
/// At most one parent field is set; all three empty means shared scope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub xpath: String,
    pub parent_device_group: Option<String>,
    pub parent_template: Option<String>,
    pub parent_vsys: Option<String>,
}

impl Location {
    pub fn new(xpath: String, scope: Scope) -> Self {
        let mut location = Location {
            xpath,
            ..Location::default()
        };
        match scope {
            Scope::Shared => {}
            Scope::DeviceGroup(name) => location.parent_device_group = Some(name),
            Scope::Template(name) => location.parent_template = Some(name),
            Scope::Vsys(name) => location.parent_vsys = Some(name),
        }
        location
    }

    /// Build the location of the element at `path`.
    pub fn of(path: &NodePath<'_>) -> Self {
        Self::new(path.xpath(), resolve_scope(path))
    }

    pub fn scope(&self) -> Scope {
        if let Some(name) = &self.parent_device_group {
            Scope::DeviceGroup(name.clone())
        } else if let Some(name) = &self.parent_template {
            Scope::Template(name.clone())
        } else if let Some(name) = &self.parent_vsys {
            Scope::Vsys(name.clone())
        } else {
            Scope::Shared
        }
    }

    /// `shared`, `device-group`, `template` or `vsys`.
    pub fn kind(&self) -> &'static str {
        if self.parent_device_group.is_some() {
            "device-group"
        } else if self.parent_template.is_some() {
            "template"
        } else if self.parent_vsys.is_some() {
            "vsys"
        } else {
            "shared"
        }
    }
}

impl FieldReadable for Location {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "xpath" => FieldValue::from(&self.xpath),
            "parent_device_group" => FieldValue::from(&self.parent_device_group),
            "parent_template" => FieldValue::from(&self.parent_template),
            "parent_vsys" => FieldValue::from(&self.parent_vsys),
            _ => FieldValue::Null,
        }
    }
}

/// Implemented by every extracted domain object.
pub trait Located {
    fn location(&self) -> &Location;
}
