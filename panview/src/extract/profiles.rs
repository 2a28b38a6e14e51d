use panview_xml::{NodePath, XmlNode};

use crate::extract::{members, text, text_or_choice, FromEntry, MalformedEntry};
use crate::location::Location;
use crate::model::{
    AntivirusProfile, AvDecoder, UrlFilteringProfile, VulnerabilityProfile, VulnerabilityRule,
};

fn vulnerability_rule(node: &XmlNode) -> Option<VulnerabilityRule> {
    Some(VulnerabilityRule {
        name: node.name()?.to_string(),
        threat_name: text(node, &["threat-name"]),
        action: text_or_choice(node, &["action"]),
        severity: members(node, &["severity"]),
        cve: members(node, &["cve"]),
        host: text(node, &["host"]),
        category: text(node, &["category"]),
        packet_capture: text(node, &["packet-capture"]),
    })
}

impl FromEntry for VulnerabilityProfile {
    const KIND: &'static str = "vulnerability profile";
    const CONTAINER: &'static [&'static str] = &["profiles", "vulnerability"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(VulnerabilityProfile {
            name: name.to_string(),
            description: text(node, &["description"]),
            rules: node
                .get_child("rules")
                .map(|rules| rules.entries().filter_map(vulnerability_rule).collect())
                .unwrap_or_default(),
            location: Location::of(entry),
        })
    }
}

impl FromEntry for UrlFilteringProfile {
    const KIND: &'static str = "url-filtering profile";
    const CONTAINER: &'static [&'static str] = &["profiles", "url-filtering"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(UrlFilteringProfile {
            name: name.to_string(),
            description: text(node, &["description"]),
            allow: members(node, &["allow"]),
            alert: members(node, &["alert"]),
            block: members(node, &["block"]),
            continue_: members(node, &["continue"]),
            override_: members(node, &["override"]),
            location: Location::of(entry),
        })
    }
}

fn av_decoder(node: &XmlNode) -> Option<AvDecoder> {
    Some(AvDecoder {
        name: node.name()?.to_string(),
        action: text(node, &["action"]),
        wildfire_action: text(node, &["wildfire-action"]),
    })
}

impl FromEntry for AntivirusProfile {
    const KIND: &'static str = "antivirus profile";
    const CONTAINER: &'static [&'static str] = &["profiles", "virus"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(AntivirusProfile {
            name: name.to_string(),
            description: text(node, &["description"]),
            decoders: node
                .get_child("decoder")
                .map(|decoders| decoders.entries().filter_map(av_decoder).collect())
                .unwrap_or_default(),
            location: Location::of(entry),
        })
    }
}
