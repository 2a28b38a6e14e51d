use serde::{Serialize, Serializer};

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

/// Which Panorama rulebase a rule list is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rulebase {
    Pre,
    Post,
}

impl Rulebase {
    pub fn container(&self) -> &'static str {
        match self {
            Rulebase::Pre => "pre-rulebase",
            Rulebase::Post => "post-rulebase",
        }
    }

    pub fn rule_type(&self) -> RuleType {
        match self {
            Rulebase::Pre => RuleType::Pre,
            Rulebase::Post => RuleType::Post,
        }
    }
}

/// Position of a rule in an aggregated policy view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Pre,
    Post,
    /// A firewall's own vsys rulebase.
    Local,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Pre => "pre",
            RuleType::Post => "post",
            RuleType::Local => "local",
        }
    }
}

/// Fields attached only when rules are aggregated across device groups.
///
/// They are not part of the document and are omitted from output when unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RuleAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rulebase_location: Option<String>,
}

impl RuleAnnotation {
    fn read_field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "device_group" => FieldValue::from(&self.device_group),
            "rule_type" => self
                .rule_type
                .map(|t| FieldValue::text(t.as_str()))
                .unwrap_or(FieldValue::Null),
            "order" => FieldValue::from(self.order),
            "rulebase_location" => FieldValue::from(&self.rulebase_location),
            _ => return None,
        })
    }
}

/// Rules that can carry a [`RuleAnnotation`].
pub trait Annotated {
    fn annotate(&mut self, annotation: RuleAnnotation);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    Allow,
    Deny,
    Drop,
    ResetClient,
    ResetServer,
    ResetBoth,
    Other(String),
}

impl RuleAction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "allow" => RuleAction::Allow,
            "deny" => RuleAction::Deny,
            "drop" => RuleAction::Drop,
            "reset-client" => RuleAction::ResetClient,
            "reset-server" => RuleAction::ResetServer,
            "reset-both" => RuleAction::ResetBoth,
            other => RuleAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Deny => "deny",
            RuleAction::Drop => "drop",
            RuleAction::ResetClient => "reset-client",
            RuleAction::ResetServer => "reset-server",
            RuleAction::ResetBoth => "reset-both",
            RuleAction::Other(value) => value,
        }
    }
}

impl Serialize for RuleAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityRule {
    pub name: String,
    pub uuid: Option<String>,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub source: Vec<String>,
    pub destination: Vec<String>,
    pub source_user: Vec<String>,
    pub category: Vec<String>,
    pub application: Vec<String>,
    pub service: Vec<String>,
    pub action: Option<RuleAction>,
    pub disabled: bool,
    pub description: Option<String>,
    pub tag: Vec<String>,
    pub negate_source: bool,
    pub negate_destination: bool,
    pub log_start: Option<bool>,
    pub log_end: Option<bool>,
    pub log_setting: Option<String>,
    pub profile_group: Option<String>,
    #[serde(flatten)]
    pub annotation: RuleAnnotation,
    #[serde(flatten)]
    pub location: Location,
}

impl Annotated for SecurityRule {
    fn annotate(&mut self, annotation: RuleAnnotation) {
        self.annotation = annotation;
    }
}

impl Located for SecurityRule {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for SecurityRule {
    fn read_field(&self, name: &str) -> FieldValue {
        if let Some(value) = self.annotation.read_field(name) {
            return value;
        }
        match name {
            "name" => FieldValue::from(&self.name),
            "uuid" => FieldValue::from(&self.uuid),
            "from" => FieldValue::from(&self.from),
            "to" => FieldValue::from(&self.to),
            "source" => FieldValue::from(&self.source),
            "destination" => FieldValue::from(&self.destination),
            "source_user" => FieldValue::from(&self.source_user),
            "category" => FieldValue::from(&self.category),
            "application" => FieldValue::from(&self.application),
            "service" => FieldValue::from(&self.service),
            "action" => self
                .action
                .as_ref()
                .map(|a| FieldValue::text(a.as_str()))
                .unwrap_or(FieldValue::Null),
            "disabled" => FieldValue::from(self.disabled),
            "description" => FieldValue::from(&self.description),
            "tag" => FieldValue::from(&self.tag),
            "negate_source" => FieldValue::from(self.negate_source),
            "negate_destination" => FieldValue::from(self.negate_destination),
            "log_start" => FieldValue::from(self.log_start),
            "log_end" => FieldValue::from(self.log_end),
            "log_setting" => FieldValue::from(&self.log_setting),
            "profile_group" => FieldValue::from(&self.profile_group),
            _ => self.location.read_field(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTranslationKind {
    DynamicIpAndPort,
    DynamicIp,
    StaticIp,
}

impl SourceTranslationKind {
    pub const ALL: [SourceTranslationKind; 3] = [
        SourceTranslationKind::DynamicIpAndPort,
        SourceTranslationKind::DynamicIp,
        SourceTranslationKind::StaticIp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTranslationKind::DynamicIpAndPort => "dynamic-ip-and-port",
            SourceTranslationKind::DynamicIp => "dynamic-ip",
            SourceTranslationKind::StaticIp => "static-ip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTranslation {
    #[serde(rename = "type")]
    pub kind: SourceTranslationKind,
    pub translated_address: Vec<String>,
    pub interface: Option<String>,
    pub interface_ip: Option<String>,
    pub bi_directional: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DestinationTranslation {
    pub translated_address: Option<String>,
    pub translated_port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NatRule {
    pub name: String,
    pub uuid: Option<String>,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub source: Vec<String>,
    pub destination: Vec<String>,
    pub service: Option<String>,
    pub to_interface: Option<String>,
    pub nat_type: Option<String>,
    pub disabled: bool,
    pub description: Option<String>,
    pub tag: Vec<String>,
    pub source_translation: Option<SourceTranslation>,
    pub destination_translation: Option<DestinationTranslation>,
    #[serde(flatten)]
    pub annotation: RuleAnnotation,
    #[serde(flatten)]
    pub location: Location,
}

impl Annotated for NatRule {
    fn annotate(&mut self, annotation: RuleAnnotation) {
        self.annotation = annotation;
    }
}

impl Located for NatRule {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for NatRule {
    fn read_field(&self, name: &str) -> FieldValue {
        if let Some(value) = self.annotation.read_field(name) {
            return value;
        }
        match name {
            "name" => FieldValue::from(&self.name),
            "uuid" => FieldValue::from(&self.uuid),
            "from" => FieldValue::from(&self.from),
            "to" => FieldValue::from(&self.to),
            "source" => FieldValue::from(&self.source),
            "destination" => FieldValue::from(&self.destination),
            "service" => FieldValue::from(&self.service),
            "to_interface" => FieldValue::from(&self.to_interface),
            "nat_type" => FieldValue::from(&self.nat_type),
            "disabled" => FieldValue::from(self.disabled),
            "description" => FieldValue::from(&self.description),
            "tag" => FieldValue::from(&self.tag),
            "source_translation" => match &self.source_translation {
                Some(st) => FieldValue::record([
                    ("type", FieldValue::text(st.kind.as_str())),
                    ("translated_address", FieldValue::from(&st.translated_address)),
                    ("interface", FieldValue::from(&st.interface)),
                    ("interface_ip", FieldValue::from(&st.interface_ip)),
                    ("bi_directional", FieldValue::from(st.bi_directional)),
                ]),
                None => FieldValue::Null,
            },
            "destination_translation" => match &self.destination_translation {
                Some(dt) => FieldValue::record([
                    ("translated_address", FieldValue::from(&dt.translated_address)),
                    ("translated_port", FieldValue::from(&dt.translated_port)),
                ]),
                None => FieldValue::Null,
            },
            _ => self.location.read_field(name),
        }
    }
}
