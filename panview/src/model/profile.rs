//! Security profiles. Each profile kind is its own type; they share no trait
//! beyond location and field access.

use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityRule {
    pub name: String,
    pub threat_name: Option<String>,
    pub action: Option<String>,
    pub severity: Vec<String>,
    pub cve: Vec<String>,
    pub host: Option<String>,
    pub category: Option<String>,
    pub packet_capture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityProfile {
    pub name: String,
    pub description: Option<String>,
    pub rules: Vec<VulnerabilityRule>,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFilteringProfile {
    pub name: String,
    pub description: Option<String>,
    pub allow: Vec<String>,
    pub alert: Vec<String>,
    pub block: Vec<String>,
    #[serde(rename = "continue")]
    pub continue_: Vec<String>,
    #[serde(rename = "override")]
    pub override_: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvDecoder {
    pub name: String,
    pub action: Option<String>,
    pub wildfire_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntivirusProfile {
    pub name: String,
    pub description: Option<String>,
    pub decoders: Vec<AvDecoder>,
    #[serde(flatten)]
    pub location: Location,
}

impl Located for VulnerabilityProfile {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Located for UrlFilteringProfile {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Located for AntivirusProfile {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl VulnerabilityProfile {
    /// Every severity mentioned by any rule, deduplicated in first-seen order.
    pub fn severities(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for severity in self.rules.iter().flat_map(|rule| rule.severity.iter()) {
            if !out.contains(severity) {
                out.push(severity.clone());
            }
        }
        out
    }
}

impl FieldReadable for VulnerabilityProfile {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "rules" => FieldValue::List(self.rules.iter().map(|r| r.name.clone()).collect()),
            "rule_count" => FieldValue::from(self.rules.len()),
            _ => self.location.read_field(name),
        }
    }
}

impl FieldReadable for UrlFilteringProfile {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "allow" => FieldValue::from(&self.allow),
            "alert" => FieldValue::from(&self.alert),
            "block" => FieldValue::from(&self.block),
            "continue" => FieldValue::from(&self.continue_),
            "override" => FieldValue::from(&self.override_),
            _ => self.location.read_field(name),
        }
    }
}

impl FieldReadable for AntivirusProfile {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "decoders" => FieldValue::List(self.decoders.iter().map(|d| d.name.clone()).collect()),
            _ => self.location.read_field(name),
        }
    }
}
