use std::collections::BTreeMap;

use panview_xml::{NodePath, XmlNode};

use crate::extract::{count_entries, text, FromEntry, MalformedEntry};
use crate::model::DeviceGroupSummary;

/// Counts taken from immediate children only; inherited objects are not included.
impl FromEntry for DeviceGroupSummary {
    const KIND: &'static str = "device-group";
    const CONTAINER: &'static [&'static str] = &["device-group"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(DeviceGroupSummary {
            name: name.to_string(),
            description: text(node, &["description"]),
            parent_device_group: text(node, &["parent-dg"]),
            devices_count: count_entries(node, &["devices"]),
            address_count: count_entries(node, &["address"]),
            address_group_count: count_entries(node, &["address-group"]),
            service_count: count_entries(node, &["service"]),
            service_group_count: count_entries(node, &["service-group"]),
            pre_security_rules_count: count_entries(node, &["pre-rulebase", "security", "rules"]),
            post_security_rules_count: count_entries(node, &["post-rulebase", "security", "rules"]),
            pre_nat_rules_count: count_entries(node, &["pre-rulebase", "nat", "rules"]),
            post_nat_rules_count: count_entries(node, &["post-rulebase", "nat", "rules"]),
            xpath: entry.xpath(),
        })
    }
}

/// Parent device groups recorded under `readonly/devices/entry/device-group`.
///
/// Panorama keeps the hierarchy there rather than on the device group itself.
pub fn readonly_parents(root: &XmlNode) -> BTreeMap<String, String> {
    let mut parents = BTreeMap::new();
    let Some(devices) = root.descend(&["readonly", "devices"]) else {
        return parents;
    };
    for device in devices.entries() {
        let Some(groups) = device.get_child("device-group") else {
            continue;
        };
        for group in groups.entries() {
            if let (Some(name), Some(parent)) = (group.name(), text(group, &["parent-dg"])) {
                parents.insert(name.to_string(), parent);
            }
        }
    }
    parents
}
