//! Security and NAT rule extraction.
//!
//! Both rule kinds live under a rulebase element (`pre-rulebase`,
//! `post-rulebase`, or a firewall vsys `rulebase`) at `<kind>/rules/entry`.

use panview_xml::{NodePath, XmlNode};

use crate::extract::{members, text, text_or_choice, yes_no, FromEntry, MalformedEntry};
use crate::location::Location;
use crate::model::{
    DestinationTranslation, NatRule, RuleAction, RuleAnnotation, SecurityRule, SourceTranslation,
    SourceTranslationKind,
};

impl FromEntry for SecurityRule {
    const KIND: &'static str = "security rule";
    const CONTAINER: &'static [&'static str] = &["security", "rules"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(SecurityRule {
            name: name.to_string(),
            uuid: node.attr("uuid").map(str::to_string),
            from: members(node, &["from"]),
            to: members(node, &["to"]),
            source: members(node, &["source"]),
            destination: members(node, &["destination"]),
            source_user: members(node, &["source-user"]),
            category: members(node, &["category"]),
            application: members(node, &["application"]),
            service: members(node, &["service"]),
            action: text_or_choice(node, &["action"]).map(|a| RuleAction::parse(&a)),
            disabled: yes_no(node, &["disabled"]).unwrap_or(false),
            description: text(node, &["description"]),
            tag: members(node, &["tag"]),
            negate_source: yes_no(node, &["negate-source"]).unwrap_or(false),
            negate_destination: yes_no(node, &["negate-destination"]).unwrap_or(false),
            log_start: yes_no(node, &["log-start"]),
            log_end: yes_no(node, &["log-end"]),
            log_setting: text(node, &["log-setting"]),
            profile_group: members(node, &["profile-setting", "group"])
                .into_iter()
                .next(),
            annotation: RuleAnnotation::default(),
            location: Location::of(entry),
        })
    }
}

fn source_translation(node: &XmlNode) -> Option<SourceTranslation> {
    let (kind, body) = SourceTranslationKind::ALL
        .into_iter()
        .find_map(|kind| node.get_child(kind.as_str()).map(|body| (kind, body)))?;

    let mut translated_address = members(body, &["translated-address"]);
    if translated_address.is_empty() {
        // static-ip carries a single text value instead of a member list
        translated_address.extend(text(body, &["translated-address"]));
    }
    Some(SourceTranslation {
        kind,
        translated_address,
        interface: text(body, &["interface-address", "interface"]),
        interface_ip: text(body, &["interface-address", "ip"]),
        bi_directional: yes_no(body, &["bi-directional"]),
    })
}

fn destination_translation(node: &XmlNode) -> DestinationTranslation {
    DestinationTranslation {
        translated_address: text(node, &["translated-address"]),
        translated_port: text(node, &["translated-port"]),
    }
}

impl FromEntry for NatRule {
    const KIND: &'static str = "nat rule";
    const CONTAINER: &'static [&'static str] = &["nat", "rules"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(NatRule {
            name: name.to_string(),
            uuid: node.attr("uuid").map(str::to_string),
            from: members(node, &["from"]),
            to: members(node, &["to"]),
            source: members(node, &["source"]),
            destination: members(node, &["destination"]),
            service: text(node, &["service"]),
            to_interface: text(node, &["to-interface"]),
            nat_type: text(node, &["nat-type"]),
            disabled: yes_no(node, &["disabled"]).unwrap_or(false),
            description: text(node, &["description"]),
            tag: members(node, &["tag"]),
            source_translation: node
                .get_child("source-translation")
                .and_then(source_translation),
            destination_translation: node
                .get_child("destination-translation")
                .map(destination_translation),
            annotation: RuleAnnotation::default(),
            location: Location::of(entry),
        })
    }
}
