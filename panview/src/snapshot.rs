//! Parse-once, query-many view of a configuration document.
//!
//! Every category is extracted eagerly when the snapshot is built. Queries
//! filter the stored lists, then paginate, then serialize the page.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::category::ObjectCategory;
use crate::detect::ConfigFlavor;
use crate::document::ConfigDocument;
use crate::filter::{select, FilterMap, Filterable};
use crate::model::{
    Address, AddressGroup, AntivirusProfile, DeviceGroupSummary, LogProfile, NatRule, Schedule,
    SecurityRule, Service, ServiceGroup, Template, TemplateStack, UrlFilteringProfile,
    VulnerabilityProfile,
};
use crate::paginate::{paginate, Page, MAX_PAGE_SIZE};

/// Extracted objects of one document. Immutable once built.
#[derive(Debug, Clone)]
pub struct Snapshot {
    flavor: ConfigFlavor,
    max_page_size: usize,
    addresses: Vec<Address>,
    address_groups: Vec<AddressGroup>,
    services: Vec<Service>,
    service_groups: Vec<ServiceGroup>,
    security_rules: Vec<SecurityRule>,
    nat_rules: Vec<NatRule>,
    device_groups: Vec<DeviceGroupSummary>,
    templates: Vec<Template>,
    template_stacks: Vec<TemplateStack>,
    log_profiles: Vec<LogProfile>,
    schedules: Vec<Schedule>,
    vulnerability_profiles: Vec<VulnerabilityProfile>,
    url_filtering_profiles: Vec<UrlFilteringProfile>,
    antivirus_profiles: Vec<AntivirusProfile>,
}

impl Snapshot {
    pub fn build(doc: &ConfigDocument) -> Self {
        let snapshot = Self {
            flavor: doc.flavor(),
            max_page_size: MAX_PAGE_SIZE,
            addresses: doc.all_addresses(),
            address_groups: doc.all_address_groups(),
            services: doc.all_services(),
            service_groups: doc.all_service_groups(),
            security_rules: doc.security_policy(),
            nat_rules: doc.nat_policy(),
            device_groups: doc.device_groups(),
            templates: doc.templates(),
            template_stacks: doc.template_stacks(),
            log_profiles: doc.all_log_profiles(),
            schedules: doc.all_schedules(),
            vulnerability_profiles: doc.all_vulnerability_profiles(),
            url_filtering_profiles: doc.all_url_filtering_profiles(),
            antivirus_profiles: doc.all_antivirus_profiles(),
        };
        info!(
            flavor = %snapshot.flavor,
            addresses = snapshot.addresses.len(),
            services = snapshot.services.len(),
            security_rules = snapshot.security_rules.len(),
            nat_rules = snapshot.nat_rules.len(),
            device_groups = snapshot.device_groups.len(),
            "snapshot built"
        );
        snapshot
    }

    /// Cap applied to requested page sizes.
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    pub fn flavor(&self) -> ConfigFlavor {
        self.flavor
    }

    pub fn count(&self, category: ObjectCategory) -> usize {
        match category {
            ObjectCategory::Addresses => self.addresses.len(),
            ObjectCategory::AddressGroups => self.address_groups.len(),
            ObjectCategory::Services => self.services.len(),
            ObjectCategory::ServiceGroups => self.service_groups.len(),
            ObjectCategory::SecurityRules => self.security_rules.len(),
            ObjectCategory::NatRules => self.nat_rules.len(),
            ObjectCategory::DeviceGroups => self.device_groups.len(),
            ObjectCategory::Templates => self.templates.len(),
            ObjectCategory::TemplateStacks => self.template_stacks.len(),
            ObjectCategory::LogProfiles => self.log_profiles.len(),
            ObjectCategory::Schedules => self.schedules.len(),
            ObjectCategory::VulnerabilityProfiles => self.vulnerability_profiles.len(),
            ObjectCategory::UrlFilteringProfiles => self.url_filtering_profiles.len(),
            ObjectCategory::AntivirusProfiles => self.antivirus_profiles.len(),
        }
    }

    /// Filter one category, then return the requested page as JSON values.
    pub fn query(
        &self,
        category: ObjectCategory,
        filters: &FilterMap,
        page: usize,
        page_size: usize,
    ) -> Result<Page<Value>, serde_json::Error> {
        let request = PageRequest {
            filters,
            page,
            page_size,
            max_page_size: self.max_page_size,
        };
        match category {
            ObjectCategory::Addresses => request.run(&self.addresses),
            ObjectCategory::AddressGroups => request.run(&self.address_groups),
            ObjectCategory::Services => request.run(&self.services),
            ObjectCategory::ServiceGroups => request.run(&self.service_groups),
            ObjectCategory::SecurityRules => request.run(&self.security_rules),
            ObjectCategory::NatRules => request.run(&self.nat_rules),
            ObjectCategory::DeviceGroups => request.run(&self.device_groups),
            ObjectCategory::Templates => request.run(&self.templates),
            ObjectCategory::TemplateStacks => request.run(&self.template_stacks),
            ObjectCategory::LogProfiles => request.run(&self.log_profiles),
            ObjectCategory::Schedules => request.run(&self.schedules),
            ObjectCategory::VulnerabilityProfiles => request.run(&self.vulnerability_profiles),
            ObjectCategory::UrlFilteringProfiles => request.run(&self.url_filtering_profiles),
            ObjectCategory::AntivirusProfiles => request.run(&self.antivirus_profiles),
        }
    }
}

struct PageRequest<'a> {
    filters: &'a FilterMap,
    page: usize,
    page_size: usize,
    max_page_size: usize,
}

impl PageRequest<'_> {
    fn run<T: Filterable + Serialize>(&self, items: &[T]) -> Result<Page<Value>, serde_json::Error> {
        let selected = select(items, self.filters, T::schema());
        paginate(selected, self.page, self.page_size, self.max_page_size).try_map(serde_json::to_value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::Snapshot;
    use crate::category::ObjectCategory;
    use crate::document::ConfigDocument;
    use crate::filter::FilterMap;

    const DOC: &[u8] = br#"<config><shared>
        <address>
          <entry name="srv1"><ip-netmask>10.0.0.5/32</ip-netmask><tag><member>prod</member></tag></entry>
          <entry name="srv2"><fqdn>srv2.example.com</fqdn></entry>
          <entry name="db1"><ip-netmask>10.0.0.9</ip-netmask><tag><member>prod</member></tag></entry>
        </address>
      </shared></config>"#;

    fn snapshot() -> Snapshot {
        Snapshot::build(&ConfigDocument::from_bytes(DOC).expect("load"))
    }

    fn filters(pairs: &[(&str, &str)]) -> FilterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn filters_apply_before_pagination() {
        let page = snapshot()
            .query(ObjectCategory::Addresses, &filters(&[("tag_in", "prod")]), 2, 1)
            .expect("query");
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["name"], json!("db1"));
        assert!(!page.has_next);
    }

    #[test]
    fn serialized_objects_carry_location_fields() {
        let page = snapshot()
            .query(ObjectCategory::Addresses, &filters(&[("name_eq", "srv2")]), 1, 10)
            .expect("query");
        let item = &page.items[0];
        assert_eq!(item["type"], json!("fqdn"));
        assert_eq!(item["ip_netmask"], json!(null));
        assert_eq!(item["parent_device_group"], json!(null));
        assert_eq!(
            item["xpath"],
            json!("/config/shared/address/entry[@name='srv2']")
        );
    }

    #[test]
    fn page_size_is_capped() {
        let snap = snapshot().with_max_page_size(2);
        let page = snap
            .query(ObjectCategory::Addresses, &FilterMap::new(), 1, 50)
            .expect("query");
        assert_eq!(page.page_size, 2);
        assert!(page.has_next);
        assert_eq!(snap.count(ObjectCategory::Addresses), 3);
        assert_eq!(snap.count(ObjectCategory::SecurityRules), 0);
    }

    #[test]
    fn snapshot_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Snapshot>();
    }
}
