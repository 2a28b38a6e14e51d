use std::collections::BTreeMap;

use panview_xml::{NodePath, XmlNode};

use crate::extract::{members, text, yes_no, FromEntry, MalformedEntry};
use crate::location::Location;
use crate::model::{
    Address, AddressGroup, LogMatch, LogProfile, PortConfig, ProtocolOverride, Recurrence,
    Schedule, Service, ServiceGroup,
};

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

impl FromEntry for Address {
    const KIND: &'static str = "address";
    const CONTAINER: &'static [&'static str] = &["address"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let mut address = Address::new(name, Location::of(entry)).with_values(
            text(node, &["ip-netmask"]),
            text(node, &["ip-range"]),
            text(node, &["fqdn"]),
        );
        address.description = text(node, &["description"]);
        address.tag = members(node, &["tag"]);
        Ok(address)
    }
}

impl FromEntry for AddressGroup {
    const KIND: &'static str = "address-group";
    const CONTAINER: &'static [&'static str] = &["address-group"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(AddressGroup {
            name: name.to_string(),
            static_members: node.get_child("static").map(XmlNode::member_texts),
            dynamic_filter: text(node, &["dynamic", "filter"]),
            description: text(node, &["description"]),
            tag: members(node, &["tag"]),
            location: Location::of(entry),
        })
    }
}

fn port_config(node: &XmlNode) -> PortConfig {
    PortConfig {
        port: text(node, &["port"]),
        source_port: text(node, &["source-port"]),
        override_: node.get_child("override").map(protocol_override),
    }
}

/// `<override><no/></override>` or `<override><yes>..timeouts..</yes></override>`.
fn protocol_override(node: &XmlNode) -> ProtocolOverride {
    match node.get_child("yes") {
        Some(yes) => ProtocolOverride {
            enabled: true,
            timeout: text(yes, &["timeout"]),
            halfclose_timeout: text(yes, &["halfclose-timeout"]),
            timewait_timeout: text(yes, &["timewait-timeout"]),
        },
        None => ProtocolOverride::default(),
    }
}

impl FromEntry for Service {
    const KIND: &'static str = "service";
    const CONTAINER: &'static [&'static str] = &["service"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let protocol = node.get_child("protocol");
        let tcp = protocol.and_then(|p| p.get_child("tcp")).map(port_config);
        let udp = protocol.and_then(|p| p.get_child("udp")).map(port_config);

        let mut service = Service::new(name, tcp, udp, Location::of(entry));
        service.description = text(node, &["description"]);
        service.tag = members(node, &["tag"]);
        Ok(service)
    }
}

impl FromEntry for ServiceGroup {
    const KIND: &'static str = "service-group";
    const CONTAINER: &'static [&'static str] = &["service-group"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let group_members = members(node, &["members"]);
        if group_members.is_empty() {
            return Err(MalformedEntry::new(Self::KIND, name, "no members"));
        }
        Ok(ServiceGroup {
            name: name.to_string(),
            members: group_members,
            tag: members(node, &["tag"]),
            location: Location::of(entry),
        })
    }
}

impl FromEntry for Schedule {
    const KIND: &'static str = "schedule";
    const CONTAINER: &'static [&'static str] = &["schedule"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let schedule_type = node.get_child("schedule-type");
        let recurring = schedule_type.and_then(|t| t.get_child("recurring"));

        let daily = recurring
            .map(|r| members(r, &["daily"]))
            .unwrap_or_default();
        let mut weekly = BTreeMap::new();
        if let Some(week) = recurring.and_then(|r| r.get_child("weekly")) {
            for day in WEEKDAYS {
                let windows = members(week, &[day]);
                if !windows.is_empty() {
                    weekly.insert(day.to_string(), windows);
                }
            }
        }
        let non_recurring = schedule_type
            .map(|t| members(t, &["non-recurring"]))
            .unwrap_or_default();

        let recurrence = if recurring.is_some_and(|r| r.get_child("daily").is_some()) {
            Some(Recurrence::Daily)
        } else if recurring.is_some_and(|r| r.get_child("weekly").is_some()) {
            Some(Recurrence::Weekly)
        } else if schedule_type.is_some_and(|t| t.get_child("non-recurring").is_some()) {
            Some(Recurrence::NonRecurring)
        } else {
            None
        };

        Ok(Schedule {
            name: name.to_string(),
            recurrence,
            daily,
            weekly,
            non_recurring,
            location: Location::of(entry),
        })
    }
}

fn log_match(node: &XmlNode) -> Option<LogMatch> {
    Some(LogMatch {
        name: node.name()?.to_string(),
        log_type: text(node, &["log-type"]),
        filter: text(node, &["filter"]),
        send_to_panorama: yes_no(node, &["send-to-panorama"]).unwrap_or(false),
        send_syslog: members(node, &["send-syslog"]),
        send_email: members(node, &["send-email"]),
        send_http: members(node, &["send-http"]),
    })
}

impl FromEntry for LogProfile {
    const KIND: &'static str = "log-profile";
    const CONTAINER: &'static [&'static str] = &["log-settings", "profiles"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let match_list = node
            .get_child("match-list")
            .map(|list| list.entries().filter_map(log_match).collect())
            .unwrap_or_default();
        Ok(LogProfile {
            name: name.to_string(),
            description: text(node, &["description"]),
            match_list,
            location: Location::of(entry),
        })
    }
}

#[cfg(test)]
mod tests {
    use panview_xml::{parse, NodePath};

    use crate::extract::extract_from;
    use crate::model::{Address, AddressGroup, AddressType, Recurrence, Schedule, Service, ServiceGroup, ServiceType};

    const SHARED: &[u8] = br#"<config><shared>
        <address>
          <entry name="srv1">
            <ip-netmask>10.0.0.5/32</ip-netmask>
            <fqdn>ignored.example.com</fqdn>
          </entry>
          <entry><ip-netmask>192.0.2.1</ip-netmask></entry>
        </address>
        <address-group>
          <entry name="empty-static"><static/></entry>
          <entry name="both">
            <static><member>srv1</member></static>
            <dynamic><filter>'prod'</filter></dynamic>
          </entry>
        </address-group>
        <service>
          <entry name="bare-tcp"><protocol><tcp/></protocol></entry>
          <entry name="override">
            <protocol><udp><port>53</port><override><yes><timeout>30</timeout></yes></override></udp></protocol>
          </entry>
        </service>
        <service-group>
          <entry name="empty"><members/></entry>
          <entry name="ok"><members><member>bare-tcp</member></members></entry>
        </service-group>
        <schedule>
          <entry name="nightly"><schedule-type><recurring><daily><member>01:00-05:00</member></daily></recurring></schedule-type></entry>
          <entry name="once"><schedule-type><non-recurring><member>2024/01/01@00:00-2024/01/02@00:00</member></non-recurring></schedule-type></entry>
        </schedule>
      </shared></config>"#;

    fn shared<T: crate::extract::FromEntry>(root: &panview_xml::XmlNode) -> Vec<T> {
        let scope = NodePath::root(root).child("shared").expect("shared");
        extract_from(&scope)
    }

    #[test]
    fn address_scenario_keeps_only_netmask() {
        let root = parse(SHARED).expect("parse");
        let addresses: Vec<Address> = shared(&root);
        assert_eq!(addresses.len(), 1);
        let srv1 = &addresses[0];
        assert_eq!(srv1.address_type, Some(AddressType::IpNetmask));
        assert_eq!(srv1.ip_netmask.as_deref(), Some("10.0.0.5/32"));
        assert!(srv1.fqdn.is_none());
        assert!(srv1.location.parent_device_group.is_none());
        assert!(srv1.location.parent_template.is_none());
        assert!(srv1.location.parent_vsys.is_none());
        assert!(srv1.location.xpath.ends_with("/shared/address/entry[@name='srv1']"));
    }

    #[test]
    fn empty_static_is_distinct_from_absent() {
        let root = parse(SHARED).expect("parse");
        let groups: Vec<AddressGroup> = shared(&root);
        assert_eq!(groups[0].static_members, Some(Vec::new()));
        assert_eq!(groups[0].dynamic_filter, None);
        assert_eq!(groups[1].static_members, Some(vec!["srv1".to_string()]));
        assert_eq!(groups[1].dynamic_filter.as_deref(), Some("'prod'"));
    }

    #[test]
    fn empty_protocol_element_still_sets_type() {
        let root = parse(SHARED).expect("parse");
        let services: Vec<Service> = shared(&root);
        assert_eq!(services[0].service_type, Some(ServiceType::Tcp));
        assert_eq!(services[0].tcp.as_ref().and_then(|t| t.port.as_deref()), None);

        let udp = services[1].udp.as_ref().expect("udp");
        let override_ = udp.override_.as_ref().expect("override");
        assert!(override_.enabled);
        assert_eq!(override_.timeout.as_deref(), Some("30"));
    }

    #[test]
    fn service_group_without_members_is_skipped() {
        let root = parse(SHARED).expect("parse");
        let groups: Vec<ServiceGroup> = shared(&root);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ok");
    }

    #[test]
    fn schedule_recurrence_follows_schedule_type() {
        let root = parse(SHARED).expect("parse");
        let schedules: Vec<Schedule> = shared(&root);
        assert_eq!(schedules[0].recurrence, Some(Recurrence::Daily));
        assert_eq!(schedules[0].daily, vec!["01:00-05:00"]);
        assert_eq!(schedules[1].recurrence, Some(Recurrence::NonRecurring));
        assert_eq!(schedules[1].non_recurring.len(), 1);
    }
}
