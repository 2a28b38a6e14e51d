use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

/// Session timeout override on a TCP/UDP service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProtocolOverride {
    pub enabled: bool,
    pub timeout: Option<String>,
    pub halfclose_timeout: Option<String>,
    pub timewait_timeout: Option<String>,
}

/// The body of a `<tcp>` or `<udp>` protocol element.
///
/// An empty but present element reads as `Some(PortConfig::default())`,
/// which is not the same as an absent protocol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PortConfig {
    pub port: Option<String>,
    pub source_port: Option<String>,
    #[serde(rename = "override")]
    pub override_: Option<ProtocolOverride>,
}

impl PortConfig {
    fn to_field(&self) -> FieldValue {
        FieldValue::record([
            ("port", FieldValue::from(&self.port)),
            ("source_port", FieldValue::from(&self.source_port)),
            (
                "override",
                self.override_
                    .as_ref()
                    .map(|o| FieldValue::Bool(o.enabled))
                    .unwrap_or(FieldValue::Null),
            ),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Tcp,
    Udp,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Tcp => "tcp",
            ServiceType::Udp => "udp",
        }
    }
}

/// A service object. `service_type` prefers TCP when both records exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub tcp: Option<PortConfig>,
    pub udp: Option<PortConfig>,
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,
    pub description: Option<String>,
    pub tag: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        tcp: Option<PortConfig>,
        udp: Option<PortConfig>,
        location: Location,
    ) -> Self {
        let service_type = match (&tcp, &udp) {
            (Some(_), _) => Some(ServiceType::Tcp),
            (None, Some(_)) => Some(ServiceType::Udp),
            (None, None) => None,
        };
        Self {
            name: name.into(),
            tcp,
            udp,
            service_type,
            description: None,
            tag: Vec::new(),
            location,
        }
    }

    /// The record matching `service_type`.
    pub fn protocol_config(&self) -> Option<&PortConfig> {
        self.tcp.as_ref().or(self.udp.as_ref())
    }

    pub fn port(&self) -> Option<&str> {
        self.protocol_config()?.port.as_deref()
    }
}

impl Located for Service {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for Service {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "tcp" => self.tcp.as_ref().map(PortConfig::to_field).unwrap_or(FieldValue::Null),
            "udp" => self.udp.as_ref().map(PortConfig::to_field).unwrap_or(FieldValue::Null),
            "type" => self
                .service_type
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
    use super::{PortConfig, Service, ServiceType};
    use crate::location::Location;

    #[test]
    fn empty_tcp_record_still_counts_as_tcp() {
        let svc = Service::new("s", Some(PortConfig::default()), None, Location::default());
        assert_eq!(svc.service_type, Some(ServiceType::Tcp));
        assert_eq!(svc.port(), None);
    }

    #[test]
    fn tcp_takes_precedence_over_udp() {
        let tcp = PortConfig {
            port: Some("80".to_string()),
            ..PortConfig::default()
        };
        let udp = PortConfig {
            port: Some("53".to_string()),
            ..PortConfig::default()
        };
        let svc = Service::new("s", Some(tcp), Some(udp), Location::default());
        assert_eq!(svc.service_type, Some(ServiceType::Tcp));
        assert_eq!(svc.port(), Some("80"));
    }

    #[test]
    fn no_protocol_means_no_type() {
        let svc = Service::new("s", None, None, Location::default());
        assert_eq!(svc.service_type, None);
    }
}
