//! One parsed configuration document and its typed accessors.
//!
//! Scope roots:
//!
//! - shared: `config/shared`
//! - device group: `config/devices/entry/device-group/entry`
//! - template: `.../template/entry/config/shared` and
//!   `.../template/entry/config/devices/entry/vsys/entry`
//! - firewall vsys: `config/devices/entry/vsys/entry`
//!
//! Accessors never fail. Missing containers read as empty lists.

use std::path::{Path, PathBuf};

use panview_xml::{find_xpath, parse, parse_file, NodePath, ParseError, XmlNode};
use thiserror::Error;

use crate::detect::{detect_flavor, ConfigFlavor};
use crate::extract::device_groups::readonly_parents;
use crate::extract::{extract_from, FromEntry};
use crate::model::{
    Address, AddressGroup, Annotated, AntivirusProfile, DeviceGroupSummary, LogProfile, NatRule,
    RuleAnnotation, RuleType, Rulebase, Schedule, SecurityRule, Service, ServiceGroup, Template,
    TemplateStack, UrlFilteringProfile, VulnerabilityProfile,
};

/// Errors returned when loading a configuration document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },
    #[error("failed to parse config document {path}: {source}")]
    Parse { path: String, source: ParseError },
}

/// A loaded PAN-OS or Panorama configuration.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    root: XmlNode,
    flavor: ConfigFlavor,
}

impl ConfigDocument {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let root = parse_file(path).map_err(|source| match source {
            ParseError::NotFound(path) => LoadError::DocumentNotFound { path },
            source => LoadError::Parse {
                path: path.display().to_string(),
                source,
            },
        })?;
        Ok(Self::from_node(root))
    }

    pub fn from_bytes(xml: &[u8]) -> Result<Self, LoadError> {
        let root = parse(xml).map_err(|source| LoadError::Parse {
            path: "<memory>".to_string(),
            source,
        })?;
        Ok(Self::from_node(root))
    }

    pub fn from_node(root: XmlNode) -> Self {
        let flavor = detect_flavor(&root);
        Self { root, flavor }
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    pub fn flavor(&self) -> ConfigFlavor {
        self.flavor
    }

    /// Resolve an xpath produced during extraction back to its element.
    pub fn lookup_xpath(&self, xpath: &str) -> Option<&XmlNode> {
        find_xpath(&self.root, xpath).map(|path| path.node())
    }

    fn root_path(&self) -> NodePath<'_> {
        NodePath::root(&self.root)
    }

    fn shared_root(&self) -> Option<NodePath<'_>> {
        self.root_path().child("shared")
    }

    fn device_entries(&self) -> Vec<NodePath<'_>> {
        self.root_path()
            .child("devices")
            .map(|devices| devices.entries())
            .unwrap_or_default()
    }

    /// Named entries under `devices/entry/<tag>` across every device entry.
    fn named_under_devices(&self, tag: &str) -> Vec<NodePath<'_>> {
        self.device_entries()
            .iter()
            .filter_map(|device| device.child(tag))
            .flat_map(|container| container.entries())
            .filter(|entry| entry.node().name().is_some())
            .collect()
    }

    fn device_group_roots(&self) -> Vec<NodePath<'_>> {
        self.named_under_devices("device-group")
    }

    fn template_entries(&self) -> Vec<NodePath<'_>> {
        self.named_under_devices("template")
    }

    fn firewall_vsys_roots(&self) -> Vec<NodePath<'_>> {
        self.named_under_devices("vsys")
    }

    fn find_named<'a>(roots: Vec<NodePath<'a>>, name: &str) -> Option<NodePath<'a>> {
        roots
            .into_iter()
            .find(|root| root.node().name() == Some(name))
    }

    /// A template's own shared section followed by each of its vsys.
    fn template_roots<'a>(template: &NodePath<'a>) -> Vec<NodePath<'a>> {
        let Some(config) = template.child("config") else {
            return Vec::new();
        };
        let mut roots: Vec<NodePath<'a>> = config.child("shared").into_iter().collect();
        if let Some(devices) = config.child("devices") {
            for device in devices.entries() {
                if let Some(vsys) = device.child("vsys") {
                    roots.extend(
                        vsys.entries()
                            .into_iter()
                            .filter(|entry| entry.node().name().is_some()),
                    );
                }
            }
        }
        roots
    }

    pub fn shared<T: FromEntry>(&self) -> Vec<T> {
        self.shared_root()
            .map(|root| extract_from(&root))
            .unwrap_or_default()
    }

    pub fn device_group<T: FromEntry>(&self, name: &str) -> Vec<T> {
        Self::find_named(self.device_group_roots(), name)
            .map(|root| extract_from(&root))
            .unwrap_or_default()
    }

    /// Objects in a template's shared section and in every vsys it configures.
    pub fn template<T: FromEntry>(&self, name: &str) -> Vec<T> {
        Self::find_named(self.template_entries(), name)
            .map(|template| {
                Self::template_roots(&template)
                    .iter()
                    .flat_map(|root| extract_from::<T>(root))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Objects in a firewall vsys.
    pub fn vsys<T: FromEntry>(&self, name: &str) -> Vec<T> {
        Self::find_named(self.firewall_vsys_roots(), name)
            .map(|root| extract_from(&root))
            .unwrap_or_default()
    }

    /// Union over shared, every device group, every template and every firewall vsys.
    pub fn all<T: FromEntry>(&self) -> Vec<T> {
        let mut out = self.shared::<T>();
        for root in self.device_group_roots() {
            out.extend(extract_from::<T>(&root));
        }
        for template in self.template_entries() {
            for root in Self::template_roots(&template) {
                out.extend(extract_from::<T>(&root));
            }
        }
        for root in self.firewall_vsys_roots() {
            out.extend(extract_from::<T>(&root));
        }
        out
    }

    pub fn shared_addresses(&self) -> Vec<Address> {
        self.shared()
    }

    pub fn device_group_addresses(&self, name: &str) -> Vec<Address> {
        self.device_group(name)
    }

    pub fn all_addresses(&self) -> Vec<Address> {
        self.all()
    }

    pub fn all_address_groups(&self) -> Vec<AddressGroup> {
        self.all()
    }

    pub fn all_services(&self) -> Vec<Service> {
        self.all()
    }

    pub fn all_service_groups(&self) -> Vec<ServiceGroup> {
        self.all()
    }

    pub fn all_schedules(&self) -> Vec<Schedule> {
        self.all()
    }

    pub fn all_log_profiles(&self) -> Vec<LogProfile> {
        self.all()
    }

    pub fn all_vulnerability_profiles(&self) -> Vec<VulnerabilityProfile> {
        self.all()
    }

    pub fn all_url_filtering_profiles(&self) -> Vec<UrlFilteringProfile> {
        self.all()
    }

    pub fn all_antivirus_profiles(&self) -> Vec<AntivirusProfile> {
        self.all()
    }

    /// Device group summaries; the parent comes from the `readonly` section when recorded there.
    pub fn device_groups(&self) -> Vec<DeviceGroupSummary> {
        let parents = readonly_parents(&self.root);
        let mut groups: Vec<DeviceGroupSummary> = Vec::new();
        for device in self.device_entries() {
            groups.extend(extract_from::<DeviceGroupSummary>(&device));
        }
        for group in &mut groups {
            if let Some(parent) = parents.get(&group.name) {
                group.parent_device_group = Some(parent.clone());
            }
        }
        groups
    }

    pub fn templates(&self) -> Vec<Template> {
        self.device_entries()
            .iter()
            .flat_map(|device| extract_from::<Template>(device))
            .collect()
    }

    pub fn template_stacks(&self) -> Vec<TemplateStack> {
        self.device_entries()
            .iter()
            .flat_map(|device| extract_from::<TemplateStack>(device))
            .collect()
    }

    pub fn device_group_names(&self) -> Vec<String> {
        names_of(&self.device_group_roots())
    }

    pub fn template_names(&self) -> Vec<String> {
        names_of(&self.template_entries())
    }

    /// Firewall vsys names. Vsys configured inside templates are listed per template.
    pub fn vsys_names(&self) -> Vec<String> {
        names_of(&self.firewall_vsys_roots())
    }

    fn rules_under<T: FromEntry>(root: Option<NodePath<'_>>, rulebase: &str) -> Vec<T> {
        root.and_then(|root| root.child(rulebase))
            .map(|rulebase| extract_from(&rulebase))
            .unwrap_or_default()
    }

    fn shared_rules<T: FromEntry>(&self, rulebase: Rulebase) -> Vec<T> {
        Self::rules_under(self.shared_root(), rulebase.container())
    }

    fn device_group_rules<T: FromEntry>(&self, name: &str, rulebase: Rulebase) -> Vec<T> {
        Self::rules_under(
            Self::find_named(self.device_group_roots(), name),
            rulebase.container(),
        )
    }

    fn vsys_rules<T: FromEntry>(&self, name: &str) -> Vec<T> {
        Self::rules_under(Self::find_named(self.firewall_vsys_roots(), name), "rulebase")
    }

    pub fn shared_security_rules(&self, rulebase: Rulebase) -> Vec<SecurityRule> {
        self.shared_rules(rulebase)
    }

    pub fn device_group_security_rules(&self, name: &str, rulebase: Rulebase) -> Vec<SecurityRule> {
        self.device_group_rules(name, rulebase)
    }

    pub fn vsys_security_rules(&self, name: &str) -> Vec<SecurityRule> {
        self.vsys_rules(name)
    }

    pub fn shared_nat_rules(&self, rulebase: Rulebase) -> Vec<NatRule> {
        self.shared_rules(rulebase)
    }

    pub fn device_group_nat_rules(&self, name: &str, rulebase: Rulebase) -> Vec<NatRule> {
        self.device_group_rules(name, rulebase)
    }

    pub fn vsys_nat_rules(&self, name: &str) -> Vec<NatRule> {
        self.vsys_rules(name)
    }

    /// Every security rule in evaluation order, annotated with its origin.
    pub fn security_policy(&self) -> Vec<SecurityRule> {
        self.policy()
    }

    /// Every NAT rule in evaluation order, annotated with its origin.
    pub fn nat_policy(&self) -> Vec<NatRule> {
        self.policy()
    }

    /// Shared pre, device-group pre, device-group post, shared post, then firewall vsys.
    fn policy<T: FromEntry + Annotated>(&self) -> Vec<T> {
        let device_groups = self.device_group_names();
        let mut segments: Vec<(Vec<T>, String, RuleType, &'static str)> = Vec::new();

        segments.push((
            self.shared_rules(Rulebase::Pre),
            "shared".to_string(),
            RuleType::Pre,
            "shared",
        ));
        for rulebase in [Rulebase::Pre, Rulebase::Post] {
            for name in &device_groups {
                segments.push((
                    self.device_group_rules(name, rulebase),
                    name.clone(),
                    rulebase.rule_type(),
                    "device-group",
                ));
            }
        }
        segments.push((
            self.shared_rules(Rulebase::Post),
            "shared".to_string(),
            RuleType::Post,
            "shared",
        ));
        for name in self.vsys_names() {
            segments.push((self.vsys_rules(&name), name, RuleType::Local, "vsys"));
        }

        let mut out = Vec::new();
        for (rules, device_group, rule_type, rulebase_location) in segments {
            for mut rule in rules {
                rule.annotate(RuleAnnotation {
                    device_group: Some(device_group.clone()),
                    rule_type: Some(rule_type),
                    order: Some(out.len() + 1),
                    rulebase_location: Some(rulebase_location.to_string()),
                });
                out.push(rule);
            }
        }
        out
    }
}

fn names_of(paths: &[NodePath<'_>]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| path.node().name().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ConfigDocument, LoadError};
    use crate::detect::ConfigFlavor;
    use crate::location::Located;
    use crate::model::{Address, Rulebase, RuleType};

    const PANORAMA: &[u8] = br#"<config>
      <shared>
        <address>
          <entry name="srv1"><ip-netmask>10.0.0.5/32</ip-netmask><fqdn>ignored.example.com</fqdn></entry>
          <entry><ip-netmask>192.0.2.1</ip-netmask></entry>
        </address>
        <pre-rulebase><security><rules><entry name="sp"/></rules></security></pre-rulebase>
        <post-rulebase><security><rules><entry name="spost"/></rules></security></post-rulebase>
      </shared>
      <devices><entry name="localhost.localdomain">
        <device-group>
          <entry name="dg1">
            <address><entry name="d1"><fqdn>d1.example.com</fqdn></entry></address>
            <pre-rulebase><security><rules><entry name="a"/><entry name="b"/></rules></security></pre-rulebase>
            <post-rulebase><security><rules><entry name="c"/></rules></security></post-rulebase>
          </entry>
          <entry name="dg2">
            <pre-rulebase><security><rules><entry name="d"/></rules></security></pre-rulebase>
          </entry>
          <entry name="bare"/>
        </device-group>
        <template><entry name="t1"><config>
          <shared><address><entry name="ts"><ip-netmask>198.51.100.1</ip-netmask></entry></address></shared>
          <devices><entry name="localhost.localdomain"><vsys><entry name="vsys1">
            <address><entry name="tv"><ip-netmask>198.51.100.2</ip-netmask></entry></address>
          </entry></vsys></entry></devices>
        </config></entry></template>
      </entry></devices>
    </config>"#;

    fn doc() -> ConfigDocument {
        ConfigDocument::from_bytes(PANORAMA).expect("load")
    }

    fn names(addresses: &[Address]) -> Vec<&str> {
        addresses.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn scope_union_adds_up() {
        let doc = doc();
        assert_eq!(doc.flavor(), ConfigFlavor::Panorama);

        let all = doc.all_addresses();
        let mut expected = doc.shared_addresses().len();
        for dg in doc.device_group_names() {
            expected += doc.device_group_addresses(&dg).len();
        }
        for template in doc.template_names() {
            expected += doc.template::<Address>(&template).len();
        }
        for vsys in doc.vsys_names() {
            expected += doc.vsys::<Address>(&vsys).len();
        }
        assert_eq!(all.len(), expected);
        assert_eq!(names(&all), vec!["srv1", "d1", "ts", "tv"]);
    }

    #[test]
    fn every_object_has_at_most_one_parent() {
        for address in doc().all_addresses() {
            let location = address.location();
            let parents = [
                &location.parent_device_group,
                &location.parent_template,
                &location.parent_vsys,
            ];
            assert!(parents.iter().filter(|p| p.is_some()).count() <= 1);
        }
    }

    #[test]
    fn template_objects_resolve_to_template_or_vsys() {
        let found = doc().template::<Address>("t1");
        assert_eq!(found[0].location.parent_template.as_deref(), Some("t1"));
        assert_eq!(found[1].location.parent_vsys.as_deref(), Some("vsys1"));
    }

    #[test]
    fn nameless_entries_contribute_nothing() {
        assert_eq!(names(&doc().shared_addresses()), vec!["srv1"]);
    }

    #[test]
    fn empty_device_group_has_zero_counts() {
        let doc = doc();
        let summaries = doc.device_groups();
        let bare = summaries.iter().find(|g| g.name == "bare").expect("bare");
        assert_eq!(bare.address_count, 0);
        assert!(doc.device_group_addresses("bare").is_empty());
        assert!(doc.device_group_addresses("missing").is_empty());
    }

    #[test]
    fn security_policy_follows_evaluation_order() {
        let policy = doc().security_policy();
        let order: Vec<(&str, &str, RuleType, usize)> = policy
            .iter()
            .map(|r| {
                (
                    r.name.as_str(),
                    r.annotation.device_group.as_deref().unwrap_or(""),
                    r.annotation.rule_type.expect("rule type"),
                    r.annotation.order.expect("order"),
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                ("sp", "shared", RuleType::Pre, 1),
                ("a", "dg1", RuleType::Pre, 2),
                ("b", "dg1", RuleType::Pre, 3),
                ("d", "dg2", RuleType::Pre, 4),
                ("c", "dg1", RuleType::Post, 5),
                ("spost", "shared", RuleType::Post, 6),
            ]
        );
        assert_eq!(
            policy[1].annotation.rulebase_location.as_deref(),
            Some("device-group")
        );
    }

    #[test]
    fn direct_rule_accessors_are_unannotated() {
        let rules = doc().device_group_security_rules("dg1", Rulebase::Post);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].annotation.order.is_none());
    }

    #[test]
    fn xpaths_resolve_back_to_their_entries() {
        let doc = doc();
        for address in doc.all_addresses() {
            let node = doc.lookup_xpath(&address.location.xpath).expect("node");
            assert_eq!(node.name(), Some(address.name.as_str()));
        }
        assert!(doc.lookup_xpath("/config/shared/address/entry[@name='nope']").is_none());
    }

    #[test]
    fn missing_file_is_document_not_found() {
        let err = ConfigDocument::load(Path::new("/nonexistent/panorama.xml")).expect_err("missing");
        assert!(matches!(err, LoadError::DocumentNotFound { .. }));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = ConfigDocument::from_bytes(b"<config><shared></config>").expect_err("bad xml");
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
