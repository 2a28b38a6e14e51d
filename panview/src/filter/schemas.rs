//! Filter schemas for every object category.
//!
//! Each schema is built once on first use and never changes afterwards.
//! Computed fields are plain functions so the registry stays data.

use once_cell::sync::Lazy;

use crate::filter::schema::{
    FieldDef, FieldType, FilterSchema, Filterable, ENUM_OPERATORS, NUMERIC_TEXT_OPERATORS,
};
use crate::filter::value::{FieldReadable, FieldValue};
use crate::location::Located;
use crate::model::{
    Address, AddressGroup, AntivirusProfile, DeviceGroupSummary, LogProfile, NatRule, Schedule,
    SecurityRule, Service, ServiceGroup, Template, TemplateStack, UrlFilteringProfile,
    VulnerabilityProfile,
};

use FieldType::{Boolean, List, Number, String as Text};

const PARENT_FIELDS: [&str; 3] = ["parent_device_group", "parent_template", "parent_vsys"];
const RULE_ZONE_FIELDS: [&str; 4] = ["from", "to", "source", "destination"];

fn location_kind<T: Located>(item: &T) -> FieldValue {
    FieldValue::text(item.location().kind())
}

fn address_value(address: &Address) -> FieldValue {
    address.value().map(FieldValue::text).unwrap_or(FieldValue::Null)
}

fn address_ip(address: &Address) -> FieldValue {
    address.ip().map(FieldValue::text).unwrap_or(FieldValue::Null)
}

fn service_protocol(service: &Service) -> FieldValue {
    service
        .service_type
        .map(|t| FieldValue::text(t.as_str()))
        .unwrap_or(FieldValue::Null)
}

fn service_port(service: &Service) -> FieldValue {
    service.port().map(FieldValue::text).unwrap_or(FieldValue::Null)
}

fn service_source_port(service: &Service) -> FieldValue {
    service
        .protocol_config()
        .and_then(|config| config.source_port.as_deref())
        .map(FieldValue::text)
        .unwrap_or(FieldValue::Null)
}

fn address_group_member(group: &AddressGroup) -> FieldValue {
    FieldValue::list(group.members())
}

fn service_group_member(group: &ServiceGroup) -> FieldValue {
    FieldValue::list(&group.members)
}

fn nat_translated_address(rule: &NatRule) -> FieldValue {
    let mut out = Vec::new();
    if let Some(st) = &rule.source_translation {
        out.extend(st.translated_address.iter().cloned());
        out.extend(st.interface_ip.iter().cloned());
    }
    if let Some(address) = rule
        .destination_translation
        .as_ref()
        .and_then(|dt| dt.translated_address.clone())
    {
        out.push(address);
    }
    FieldValue::List(out)
}

fn vulnerability_severity(profile: &VulnerabilityProfile) -> FieldValue {
    FieldValue::List(profile.severities())
}

/// Shared tail of every scoped object schema: location classifier, parents, xpath.
fn with_location<T: FieldReadable + Located>(schema: FilterSchema<T>) -> FilterSchema<T> {
    schema
        .field(
            FieldDef::computed("location", Text, location_kind::<T>).operators(ENUM_OPERATORS),
        )
        .fields_of(Text, &PARENT_FIELDS)
        .field(FieldDef::new("xpath", Text).case_sensitive())
}

/// Runtime-only fields present on aggregated rule views.
fn with_rule_annotation<T: FieldReadable>(schema: FilterSchema<T>) -> FilterSchema<T> {
    schema
        .fields_of(Text, &["device_group", "rulebase_location"])
        .field(FieldDef::new("rule_type", Text).operators(ENUM_OPERATORS))
        .field(FieldDef::new("order", Number))
}

static ADDRESS_SCHEMA: Lazy<FilterSchema<Address>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("addresses")
            .fields_of(Text, &["name", "ip_netmask", "ip_range", "fqdn", "description"])
            .field(FieldDef::new("type", Text).operators(ENUM_OPERATORS))
            .field(FieldDef::computed("value", Text, address_value))
            .field(FieldDef::computed("ip", Text, address_ip))
            .field(FieldDef::new("tag", List)),
    )
});

static ADDRESS_GROUP_SCHEMA: Lazy<FilterSchema<AddressGroup>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("address-groups")
            .fields_of(Text, &["name", "description", "dynamic"])
            .field(FieldDef::new("static", List))
            .field(FieldDef::new("type", Text).operators(ENUM_OPERATORS))
            .field(FieldDef::computed("member", List, address_group_member))
            .field(FieldDef::new("tag", List)),
    )
});

static SERVICE_SCHEMA: Lazy<FilterSchema<Service>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("services")
            .fields_of(Text, &["name", "description"])
            .field(FieldDef::new("type", Text).operators(ENUM_OPERATORS))
            .field(
                FieldDef::computed("protocol", Text, service_protocol).operators(ENUM_OPERATORS),
            )
            .field(
                FieldDef::computed("port", Text, service_port).operators(NUMERIC_TEXT_OPERATORS),
            )
            .field(
                FieldDef::computed("source_port", Text, service_source_port)
                    .operators(NUMERIC_TEXT_OPERATORS),
            )
            .field(
                FieldDef::new("tcp_port", Text)
                    .path("tcp.port")
                    .operators(NUMERIC_TEXT_OPERATORS),
            )
            .field(
                FieldDef::new("udp_port", Text)
                    .path("udp.port")
                    .operators(NUMERIC_TEXT_OPERATORS),
            )
            .field(FieldDef::new("tag", List)),
    )
});

static SERVICE_GROUP_SCHEMA: Lazy<FilterSchema<ServiceGroup>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("service-groups")
            .field(FieldDef::new("name", Text))
            .field(FieldDef::new("members", List))
            .field(FieldDef::computed("member", List, service_group_member))
            .field(FieldDef::new("tag", List)),
    )
});

static SECURITY_RULE_SCHEMA: Lazy<FilterSchema<SecurityRule>> = Lazy::new(|| {
    let schema = FilterSchema::new("security-rules")
        .fields_of(Text, &["name", "description", "log_setting", "profile_group"])
        .field(FieldDef::new("uuid", Text).case_sensitive())
        .fields_of(List, &RULE_ZONE_FIELDS)
        .fields_of(List, &["source_user", "category", "application", "service", "tag"])
        .field(FieldDef::new("action", Text).operators(ENUM_OPERATORS))
        .fields_of(
            Boolean,
            &["disabled", "negate_source", "negate_destination", "log_start", "log_end"],
        );
    with_location(with_rule_annotation(schema))
});

static NAT_RULE_SCHEMA: Lazy<FilterSchema<NatRule>> = Lazy::new(|| {
    let schema = FilterSchema::new("nat-rules")
        .fields_of(Text, &["name", "description", "service", "to_interface", "nat_type"])
        .field(FieldDef::new("uuid", Text).case_sensitive())
        .fields_of(List, &RULE_ZONE_FIELDS)
        .field(FieldDef::new("tag", List))
        .field(FieldDef::new("disabled", Boolean))
        .field(
            FieldDef::new("source_translation_type", Text)
                .path("source_translation.type")
                .operators(ENUM_OPERATORS),
        )
        .field(FieldDef::computed(
            "translated_address",
            List,
            nat_translated_address,
        ))
        .field(
            FieldDef::new("translated_port", Text)
                .path("destination_translation.translated_port")
                .operators(NUMERIC_TEXT_OPERATORS),
        );
    with_location(with_rule_annotation(schema))
});

static DEVICE_GROUP_SCHEMA: Lazy<FilterSchema<DeviceGroupSummary>> = Lazy::new(|| {
    FilterSchema::new("device-groups")
        .fields_of(Text, &["name", "description", "parent_device_group"])
        .fields_of(
            Number,
            &[
                "devices_count",
                "address_count",
                "address_group_count",
                "service_count",
                "service_group_count",
                "pre_security_rules_count",
                "post_security_rules_count",
                "pre_nat_rules_count",
                "post_nat_rules_count",
            ],
        )
        .field(FieldDef::new("xpath", Text).case_sensitive())
});

static TEMPLATE_SCHEMA: Lazy<FilterSchema<Template>> = Lazy::new(|| {
    FilterSchema::new("templates")
        .fields_of(Text, &["name", "description"])
        .field(FieldDef::new("vsys", List))
        .field(FieldDef::new("xpath", Text).case_sensitive())
});

static TEMPLATE_STACK_SCHEMA: Lazy<FilterSchema<TemplateStack>> = Lazy::new(|| {
    FilterSchema::new("template-stacks")
        .fields_of(Text, &["name", "description"])
        .fields_of(List, &["templates", "devices"])
        .field(FieldDef::new("first_template", Text).path("templates[0]"))
        .field(FieldDef::new("xpath", Text).case_sensitive())
});

static LOG_PROFILE_SCHEMA: Lazy<FilterSchema<LogProfile>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("log-profiles")
            .fields_of(Text, &["name", "description"])
            .fields_of(List, &["log_types", "match_names", "syslog_profiles"])
            .field(FieldDef::new("send_to_panorama", Boolean)),
    )
});

static SCHEDULE_SCHEMA: Lazy<FilterSchema<Schedule>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("schedules")
            .field(FieldDef::new("name", Text))
            .field(FieldDef::new("recurrence", Text).operators(ENUM_OPERATORS))
            .fields_of(List, &["daily", "weekdays", "non_recurring"]),
    )
});

static VULNERABILITY_PROFILE_SCHEMA: Lazy<FilterSchema<VulnerabilityProfile>> =
    Lazy::new(|| {
        with_location(
            FilterSchema::new("vulnerability-profiles")
                .fields_of(Text, &["name", "description"])
                .field(FieldDef::new("rules", List))
                .field(FieldDef::new("rule_count", Number))
                .field(FieldDef::computed("severity", List, vulnerability_severity)),
        )
    });

static URL_FILTERING_PROFILE_SCHEMA: Lazy<FilterSchema<UrlFilteringProfile>> =
    Lazy::new(|| {
        with_location(
            FilterSchema::new("url-filtering-profiles")
                .fields_of(Text, &["name", "description"])
                .fields_of(List, &["allow", "alert", "block", "continue", "override"]),
        )
    });

static ANTIVIRUS_PROFILE_SCHEMA: Lazy<FilterSchema<AntivirusProfile>> = Lazy::new(|| {
    with_location(
        FilterSchema::new("antivirus-profiles")
            .fields_of(Text, &["name", "description"])
            .field(FieldDef::new("decoders", List)),
    )
});

macro_rules! register_schema {
    ($($ty:ty => $schema:ident),+ $(,)?) => {
        $(
            impl Filterable for $ty {
                fn schema() -> &'static FilterSchema<Self> {
                    &$schema
                }
            }
        )+
    };
}

register_schema! {
    Address => ADDRESS_SCHEMA,
    AddressGroup => ADDRESS_GROUP_SCHEMA,
    Service => SERVICE_SCHEMA,
    ServiceGroup => SERVICE_GROUP_SCHEMA,
    SecurityRule => SECURITY_RULE_SCHEMA,
    NatRule => NAT_RULE_SCHEMA,
    DeviceGroupSummary => DEVICE_GROUP_SCHEMA,
    Template => TEMPLATE_SCHEMA,
    TemplateStack => TEMPLATE_STACK_SCHEMA,
    LogProfile => LOG_PROFILE_SCHEMA,
    Schedule => SCHEDULE_SCHEMA,
    VulnerabilityProfile => VULNERABILITY_PROFILE_SCHEMA,
    UrlFilteringProfile => URL_FILTERING_PROFILE_SCHEMA,
    AntivirusProfile => ANTIVIRUS_PROFILE_SCHEMA,
}
