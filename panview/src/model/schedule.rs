use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::{FieldReadable, FieldValue};
use crate::location::{Located, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    Daily,
    Weekly,
    NonRecurring,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::NonRecurring => "non-recurring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub name: String,
    pub recurrence: Option<Recurrence>,
    /// `HH:MM-HH:MM` windows applying every day.
    pub daily: Vec<String>,
    /// Windows keyed by lowercase weekday.
    pub weekly: BTreeMap<String, Vec<String>>,
    /// `YYYY/MM/DD@HH:MM-YYYY/MM/DD@HH:MM` ranges.
    pub non_recurring: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl Located for Schedule {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl FieldReadable for Schedule {
    fn read_field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::from(&self.name),
            "recurrence" => self
                .recurrence
                .map(|r| FieldValue::text(r.as_str()))
                .unwrap_or(FieldValue::Null),
            "daily" => FieldValue::from(&self.daily),
            "weekdays" => FieldValue::List(self.weekly.keys().cloned().collect()),
            "non_recurring" => FieldValue::from(&self.non_recurring),
            _ => self.location.read_field(name),
        }
    }
}
