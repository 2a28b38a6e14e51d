use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: String,
    pub description: Option<String>,
    /// Names of the vsys entries configured inside the template.
    pub vsys: Vec<String>,
    pub xpath: String,
}

/// A template stack. `templates` keeps document order; later templates
/// override earlier ones on the device, which this crate does not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateStack {
    pub name: String,
    pub description: Option<String>,
    pub templates: Vec<String>,
    pub devices: Vec<String>,
    pub xpath: String,
}

impl FieldReadable for Template {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "vsys" => FieldValue::from(&self.vsys),
            "xpath" => FieldValue::from(&self.xpath),
            _ => FieldValue::Null,
        }
    }
}

impl FieldReadable for TemplateStack {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "templates" => FieldValue::from(&self.templates),
            "devices" => FieldValue::from(&self.devices),
            "xpath" => FieldValue::from(&self.xpath),
            _ => FieldValue::Null,
        }
    }
}
