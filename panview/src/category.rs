use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::filter::{FieldInfo, Filterable};
use crate::model::{
    Address, AddressGroup, AntivirusProfile, DeviceGroupSummary, LogProfile, NatRule, Schedule,
    SecurityRule, Service, ServiceGroup, Template, TemplateStack, UrlFilteringProfile,
    VulnerabilityProfile,
};

/// Every listable object category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectCategory {
    Addresses,
    AddressGroups,
    Services,
    ServiceGroups,
    SecurityRules,
    NatRules,
    DeviceGroups,
    Templates,
    TemplateStacks,
    LogProfiles,
    Schedules,
    VulnerabilityProfiles,
    UrlFilteringProfiles,
    AntivirusProfiles,
}

impl ObjectCategory {
    pub const ALL: [ObjectCategory; 14] = [
        ObjectCategory::Addresses,
        ObjectCategory::AddressGroups,
        ObjectCategory::Services,
        ObjectCategory::ServiceGroups,
        ObjectCategory::SecurityRules,
        ObjectCategory::NatRules,
        ObjectCategory::DeviceGroups,
        ObjectCategory::Templates,
        ObjectCategory::TemplateStacks,
        ObjectCategory::LogProfiles,
        ObjectCategory::Schedules,
        ObjectCategory::VulnerabilityProfiles,
        ObjectCategory::UrlFilteringProfiles,
        ObjectCategory::AntivirusProfiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectCategory::Addresses => "addresses",
            ObjectCategory::AddressGroups => "address-groups",
            ObjectCategory::Services => "services",
            ObjectCategory::ServiceGroups => "service-groups",
            ObjectCategory::SecurityRules => "security-rules",
            ObjectCategory::NatRules => "nat-rules",
            ObjectCategory::DeviceGroups => "device-groups",
            ObjectCategory::Templates => "templates",
            ObjectCategory::TemplateStacks => "template-stacks",
            ObjectCategory::LogProfiles => "log-profiles",
            ObjectCategory::Schedules => "schedules",
            ObjectCategory::VulnerabilityProfiles => "vulnerability-profiles",
            ObjectCategory::UrlFilteringProfiles => "url-filtering-profiles",
            ObjectCategory::AntivirusProfiles => "antivirus-profiles",
        }
    }

    /// Filterable fields of this category, in schema order.
    pub fn describe(&self) -> Vec<FieldInfo> {
        match self {
            ObjectCategory::Addresses => Address::schema().describe(),
            ObjectCategory::AddressGroups => AddressGroup::schema().describe(),
            ObjectCategory::Services => Service::schema().describe(),
            ObjectCategory::ServiceGroups => ServiceGroup::schema().describe(),
            ObjectCategory::SecurityRules => SecurityRule::schema().describe(),
            ObjectCategory::NatRules => NatRule::schema().describe(),
            ObjectCategory::DeviceGroups => DeviceGroupSummary::schema().describe(),
            ObjectCategory::Templates => Template::schema().describe(),
            ObjectCategory::TemplateStacks => TemplateStack::schema().describe(),
            ObjectCategory::LogProfiles => LogProfile::schema().describe(),
            ObjectCategory::Schedules => Schedule::schema().describe(),
            ObjectCategory::VulnerabilityProfiles => VulnerabilityProfile::schema().describe(),
            ObjectCategory::UrlFilteringProfiles => UrlFilteringProfile::schema().describe(),
            ObjectCategory::AntivirusProfiles => AntivirusProfile::schema().describe(),
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectCategory {
    type Err = String;

    /// Accepts `address-groups` and `address_groups` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ObjectCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ObjectCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectCategory;

    #[test]
    fn names_round_trip_with_either_separator() {
        for category in ObjectCategory::ALL {
            assert_eq!(category.as_str().parse::<ObjectCategory>(), Ok(category));
        }
        assert_eq!(
            "nat_rules".parse::<ObjectCategory>(),
            Ok(ObjectCategory::NatRules)
        );
        assert!("firewalls".parse::<ObjectCategory>().is_err());
    }

    #[test]
    fn every_schema_declares_name_first() {
        for category in ObjectCategory::ALL {
            let fields = category.describe();
            assert_eq!(fields.first().map(|f| f.name), Some("name"), "{category}");
        }
    }
}
