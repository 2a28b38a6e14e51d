use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};
use crate::model::non_empty;

/// Which value field an address was defined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressType {
    IpNetmask,
    IpRange,
    Fqdn,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::IpNetmask => "ip-netmask",
            AddressType::IpRange => "ip-range",
            AddressType::Fqdn => "fqdn",
        }
    }
}

/// An address object.
///
/// Only one of `ip_netmask`, `ip_range` and `fqdn` survives construction;
/// the winner is picked in that order of precedence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub name: String,
    pub ip_netmask: Option<String>,
    pub ip_range: Option<String>,
    pub fqdn: Option<String>,
    #[serde(rename = "type")]
    pub address_type: Option<AddressType>,
    pub description: Option<String>,
    pub tag: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl Address {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            ip_netmask: None,
            ip_range: None,
            fqdn: None,
            address_type: None,
            description: None,
            tag: Vec::new(),
            location,
        }
    }

    /// Set the value fields, keeping only the highest-precedence populated one.
    pub fn with_values(
        mut self,
        ip_netmask: Option<String>,
        ip_range: Option<String>,
        fqdn: Option<String>,
    ) -> Self {
        let (ip_netmask, ip_range, fqdn) = (non_empty(ip_netmask), non_empty(ip_range), non_empty(fqdn));
        self.ip_netmask = None;
        self.ip_range = None;
        self.fqdn = None;
        self.address_type = if ip_netmask.is_some() {
            self.ip_netmask = ip_netmask;
            Some(AddressType::IpNetmask)
        } else if ip_range.is_some() {
            self.ip_range = ip_range;
            Some(AddressType::IpRange)
        } else if fqdn.is_some() {
            self.fqdn = fqdn;
            Some(AddressType::Fqdn)
        } else {
            None
        };
        self
    }

    /// Whichever value field is populated.
    pub fn value(&self) -> Option<&str> {
        self.ip_netmask
            .as_deref()
            .or(self.ip_range.as_deref())
            .or(self.fqdn.as_deref())
    }

    /// The IP-shaped value, ignoring FQDNs.
    pub fn ip(&self) -> Option<&str> {
        self.ip_netmask.as_deref().or(self.ip_range.as_deref())
    }
}

impl Located for Address {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for Address {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "ip_netmask" => FieldValue::from(&self.ip_netmask),
            "ip_range" => FieldValue::from(&self.ip_range),
            "fqdn" => FieldValue::from(&self.fqdn),
            "type" => self
                .address_type
                .map(|t| FieldValue::text(t.as_str()))
                .unwrap_or(FieldValue::Null),
            "description" => FieldValue::from(&self.description),
            "tag" => FieldValue::from(&self.tag),
            _ => self.location.read_field(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, AddressType};
    use crate::location::Location;

    fn addr() -> Address {
        Address::new("a", Location::default())
    }

    #[test]
    fn netmask_wins_and_losers_are_cleared() {
        let a = addr().with_values(
            Some("10.0.0.5/32".to_string()),
            Some("10.0.0.1-10.0.0.9".to_string()),
            Some("ignored.example.com".to_string()),
        );
        assert_eq!(a.address_type, Some(AddressType::IpNetmask));
        assert_eq!(a.ip_netmask.as_deref(), Some("10.0.0.5/32"));
        assert!(a.ip_range.is_none());
        assert!(a.fqdn.is_none());
    }

    #[test]
    fn empty_strings_do_not_win() {
        let a = addr().with_values(Some(" ".to_string()), None, Some("h.example.com".to_string()));
        assert_eq!(a.address_type, Some(AddressType::Fqdn));
        assert!(a.ip_netmask.is_none());
        assert_eq!(a.value(), Some("h.example.com"));
        assert_eq!(a.ip(), None);
    }

    #[test]
    fn no_value_means_no_type() {
        let a = addr().with_values(None, None, None);
        assert_eq!(a.address_type, None);
        assert_eq!(a.value(), None);
    }
}
