use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

/// One forwarding rule inside a log forwarding profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogMatch {
    pub name: String,
    pub log_type: Option<String>,
    pub filter: Option<String>,
    pub send_to_panorama: bool,
    pub send_syslog: Vec<String>,
    pub send_email: Vec<String>,
    pub send_http: Vec<String>,
}

/// A log forwarding profile (`log-settings/profiles/entry`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogProfile {
    pub name: String,
    pub description: Option<String>,
    pub match_list: Vec<LogMatch>,
    #[serde(flatten)]
    pub location: Location,
}

impl Located for LogProfile {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for LogProfile {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "log_types" => FieldValue::List(
                self.match_list
                    .iter()
                    .filter_map(|m| m.log_type.clone())
                    .collect(),
            ),
            "match_names" => {
                FieldValue::List(self.match_list.iter().map(|m| m.name.clone()).collect())
            }
            "send_to_panorama" => {
                FieldValue::Bool(self.match_list.iter().any(|m| m.send_to_panorama))
            }
            "syslog_profiles" => FieldValue::List(
                self.match_list
                    .iter()
                    .flat_map(|m| m.send_syslog.iter().cloned())
                    .collect(),
            ),
            _ => self.location.read_field(name),
        }
    }
}
