//! Typed records for each configuration object category.
//!
//! Objects and rules carry a [`Location`](crate::location::Location); scope
//! summaries (device groups, templates, stacks) carry their plain xpath.
//! Records are immutable once extracted. Derived fields (address type,
//! service type) are computed at construction.

pub mod address;
pub mod device_group;
pub mod group;
pub mod log_profile;
pub mod profile;
pub mod rule;
pub mod schedule;
pub mod service;
pub mod template;

pub use address::{Address, AddressType};
pub use device_group::DeviceGroupSummary;
pub use group::{AddressGroup, ServiceGroup};
pub use log_profile::{LogMatch, LogProfile};
pub use profile::{AntivirusProfile, AvDecoder, UrlFilteringProfile, VulnerabilityProfile, VulnerabilityRule};
pub use rule::{
    Annotated, DestinationTranslation, NatRule, RuleAction, RuleAnnotation, RuleType, Rulebase,
    SecurityRule, SourceTranslation, SourceTranslationKind,
};
pub use schedule::{Recurrence, Schedule};
pub use service::{PortConfig, ProtocolOverride, Service, ServiceType};
pub use template::{Template, TemplateStack};

/// Treat empty or whitespace-only strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
