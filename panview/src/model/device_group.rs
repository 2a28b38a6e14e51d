use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};

/// A device group with child counts taken directly from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceGroupSummary {
    pub name: String,
    pub description: Option<String>,
    pub parent_device_group: Option<String>,
    pub devices_count: usize,
    pub address_count: usize,
    pub address_group_count: usize,
    pub service_count: usize,
    pub service_group_count: usize,
    pub pre_security_rules_count: usize,
    pub post_security_rules_count: usize,
    pub pre_nat_rules_count: usize,
    pub post_nat_rules_count: usize,
    pub xpath: String,
}

impl FieldReadable for DeviceGroupSummary {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "parent_device_group" => FieldValue::from(&self.parent_device_group),
            "devices_count" => FieldValue::from(self.devices_count),
            "address_count" => FieldValue::from(self.address_count),
            "address_group_count" => FieldValue::from(self.address_group_count),
            "service_count" => FieldValue::from(self.service_count),
            "service_group_count" => FieldValue::from(self.service_group_count),
            "pre_security_rules_count" => FieldValue::from(self.pre_security_rules_count),
            "post_security_rules_count" => FieldValue::from(self.post_security_rules_count),
            "pre_nat_rules_count" => FieldValue::from(self.pre_nat_rules_count),
            "post_nat_rules_count" => FieldValue::from(self.post_nat_rules_count),
            "xpath" => FieldValue::from(&self.xpath),
            _ => FieldValue::Null,
        }
    }
}
