//! Declarative per-field filtering over extracted objects.
//!
//! A request arrives as a flat map of `<field>_<operator>` keys to raw
//! string values. Keys are resolved against the category's
//! [`FilterSchema`]; unknown fields and operators a field does not allow are
//! dropped. Surviving predicates are ANDed.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use panview::document::ConfigDocument;
//! use panview::filter::{apply_filters, FilterMap, Filterable};
//! use panview::model::Address;
//!
//! # fn main() -> anyhow::Result<()> {
//! let addresses = ConfigDocument::load(Path::new("panorama.xml"))?.all_addresses();
//! let mut filters = FilterMap::new();
//! filters.insert("name_contains".into(), Some("srv".into()));
//! filters.insert("tag_in".into(), Some("prod".into()));
//! let hits = apply_filters(&addresses, &filters, Address::schema());
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

pub mod evaluate;
pub mod operator;
pub mod schema;
pub mod schemas;
pub mod value;

use std::collections::BTreeMap;

use tracing::debug;

pub use evaluate::apply_operator;
pub use operator::{split_filter_key, Operator};
pub use schema::{FieldDef, FieldInfo, FieldType, FilterSchema, Filterable};
pub use value::{read_path, FieldReadable, FieldValue};

/// Raw filter input. A `None` value requests a null comparison.
pub type FilterMap = BTreeMap<String, Option<String>>;

/// A filter key resolved against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: &'static str,
    pub op: Operator,
    pub value: Option<String>,
}

/// Resolve flat filter keys into predicates for `schema`.
///
/// Never fails: keys naming unknown fields, or operators the field does not
/// allow, contribute no predicate.
pub fn compile<T: FieldReadable>(filters: &FilterMap, schema: &FilterSchema<T>) -> Vec<Predicate> {
    let mut out = Vec::new();
    for (key, value) in filters {
        let (field_name, op) = split_filter_key(key);
        let def = match schema.get(field_name) {
            Some(def) => def,
            None => match schema.get(key) {
                Some(def) => def,
                None => {
                    debug!(category = schema.category(), key = key.as_str(), "ignoring filter on unknown field");
                    continue;
                }
            },
        };
        // A bare field name carries no suffix; with no value it asks for null.
        let op = match (def.name == key.as_str(), value) {
            (true, None) => Operator::Eq,
            (true, Some(_)) => Operator::DEFAULT,
            (false, _) => op,
        };
        if !def.allows(op) {
            debug!(
                category = schema.category(),
                field = def.name,
                op = op.as_str(),
                "ignoring operator not allowed for field"
            );
            continue;
        }
        out.push(Predicate {
            field: def.name,
            op,
            value: value.clone(),
        });
    }
    out
}

/// Whether `item` satisfies every predicate.
pub fn matches<T: FieldReadable>(item: &T, predicates: &[Predicate], schema: &FilterSchema<T>) -> bool {
    predicates.iter().all(|predicate| {
        let Some(def) = schema.get(predicate.field) else {
            return true;
        };
        let case_sensitive = def.case_sensitive || !predicate.op.respects_case_folding();
        apply_operator(
            &def.extract(item),
            predicate.value.as_deref(),
            predicate.op,
            case_sensitive,
        )
    })
}

/// Borrow the matching items, preserving order.
pub fn select<'a, T: FieldReadable>(
    items: &'a [T],
    filters: &FilterMap,
    schema: &FilterSchema<T>,
) -> Vec<&'a T> {
    let predicates = compile(filters, schema);
    if predicates.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| matches(*item, &predicates, schema))
        .collect()
}

/// Return the matching items, preserving order.
pub fn apply_filters<T: FieldReadable + Clone>(
    items: &[T],
    filters: &FilterMap,
    schema: &FilterSchema<T>,
) -> Vec<T> {
    select(items, filters, schema).into_iter().cloned().collect()
}

/// Build a [`FilterMap`] from `key=value` strings; a bare `key` maps to a null value.
pub fn parse_filter_args<S: AsRef<str>>(args: &[S]) -> FilterMap {
    args.iter()
        .filter_map(|arg| {
            let arg = arg.as_ref().trim();
            if arg.is_empty() {
                return None;
            }
            Some(match arg.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), Some(value.to_string())),
                None => (arg.to_string(), None),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{apply_filters, compile, parse_filter_args, FilterMap, Filterable, Operator};
    use crate::location::{Location, Scope};
    use crate::model::{Address, PortConfig, Service};

    fn address(name: &str, tags: &[&str]) -> Address {
        let mut a = Address::new(name, Location::new(format!("/a/{name}"), Scope::Shared))
            .with_values(Some("10.0.0.1".to_string()), None, None);
        a.tag = tags.iter().map(|t| t.to_string()).collect();
        a
    }

    fn tcp_service(name: &str, port: &str) -> Service {
        let tcp = PortConfig {
            port: Some(port.to_string()),
            ..PortConfig::default()
        };
        Service::new(name, Some(tcp), None, Location::default())
    }

    fn filters(pairs: &[(&str, Option<&str>)]) -> FilterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| name(i).to_string()).collect()
    }

    #[test]
    fn name_and_tag_filters_are_conjunctive() {
        let items = vec![address("srv1", &["prod", "web"]), address("srv2", &["dev"])];
        let f = filters(&[("name_contains", Some("srv")), ("tag_in", Some("prod"))]);

        let hits = apply_filters(&items, &f, Address::schema());
        assert_eq!(names(&hits, |a| a.name.as_str()), vec!["srv1"]);
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let items = vec![address("b", &[]), address("a", &[])];
        let hits = apply_filters(&items, &FilterMap::new(), Address::schema());
        assert_eq!(hits, items);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let items = vec![address("a", &[])];
        let f = filters(&[("colour_eq", Some("blue")), ("bogus", Some("x"))]);
        assert!(compile(&f, Address::schema()).is_empty());
        assert_eq!(apply_filters(&items, &f, Address::schema()).len(), 1);
    }

    #[test]
    fn disallowed_operator_is_dropped() {
        let f = filters(&[("type_contains", Some("ip"))]);
        assert!(compile(&f, Address::schema()).is_empty());
    }

    #[test]
    fn bare_field_key_defaults_to_contains() {
        let f = filters(&[("name", Some("rv"))]);
        let predicates = compile(&f, Address::schema());
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].op, Operator::Contains);
        assert_eq!(predicates[0].field, "name");
    }

    #[test]
    fn bare_field_key_without_value_matches_nulls() {
        let mut fqdn_host = address("named", &[]);
        fqdn_host.ip_netmask = None;
        fqdn_host.fqdn = Some("named.example.com".to_string());
        let items = vec![address("plain", &[]), fqdn_host];

        let f = parse_filter_args(&["fqdn"]);
        let predicates = compile(&f, Address::schema());
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].op, Operator::Eq);

        let hits = apply_filters(&items, &f, Address::schema());
        assert_eq!(names(&hits, |a| a.name.as_str()), vec!["plain"]);
    }

    #[test]
    fn tag_eq_requires_the_whole_list() {
        let items = vec![
            address("single", &["prod"]),
            address("pair", &["prod", "web"]),
            address("none", &[]),
        ];
        let f = filters(&[("tag_eq", Some("prod"))]);
        let hits = apply_filters(&items, &f, Address::schema());
        assert_eq!(names(&hits, |a| a.name.as_str()), vec!["single"]);

        let f = filters(&[("tag_eq", Some("prod,web"))]);
        let hits = apply_filters(&items, &f, Address::schema());
        assert_eq!(names(&hits, |a| a.name.as_str()), vec!["pair"]);
    }

    #[test]
    fn port_gte_compares_numerically() {
        let items = vec![tcp_service("http", "80"), tcp_service("alt", "8080")];
        let f = filters(&[("port_gte", Some("1024"))]);
        let hits = apply_filters(&items, &f, Service::schema());
        assert_eq!(names(&hits, |s| s.name.as_str()), vec!["alt"]);
    }

    #[test]
    fn null_type_eq_matches_services_without_protocol() {
        let items = vec![
            Service::new("bare", None, None, Location::default()),
            tcp_service("web", "80"),
        ];
        let f = filters(&[("type_eq", None)]);
        let hits = apply_filters(&items, &f, Service::schema());
        assert_eq!(names(&hits, |s| s.name.as_str()), vec!["bare"]);
    }

    #[test]
    fn regex_is_case_sensitive() {
        let items = vec![
            address("web-1", &[]),
            address("web-01a", &[]),
            address("db-1", &[]),
            address("WEB-2", &[]),
        ];
        let f = filters(&[("name_regex", Some("^web-[0-9]+$"))]);
        let hits = apply_filters(&items, &f, Address::schema());
        assert_eq!(names(&hits, |a| a.name.as_str()), vec!["web-1"]);
    }

    #[test]
    fn filtering_is_idempotent_and_composes() {
        let items = vec![
            address("srv1", &["prod"]),
            address("srv2", &["dev"]),
            address("db1", &["prod"]),
        ];
        let f1 = filters(&[("name_starts_with", Some("srv"))]);
        let f2 = filters(&[("tag_in", Some("prod"))]);
        let mut both = f1.clone();
        both.extend(f2.clone());

        let once = apply_filters(&items, &both, Address::schema());
        let twice = apply_filters(&once, &both, Address::schema());
        assert_eq!(once, twice);

        let chained = apply_filters(
            &apply_filters(&items, &f1, Address::schema()),
            &f2,
            Address::schema(),
        );
        assert_eq!(once, chained);
        assert_eq!(names(&once, |a| a.name.as_str()), vec!["srv1"]);
    }

    #[test]
    fn filter_args_split_on_first_equals() {
        let parsed = parse_filter_args(&["name_eq=a=b", "type_eq", " "]);
        assert_eq!(parsed.get("name_eq"), Some(&Some("a=b".to_string())));
        assert_eq!(parsed.get("type_eq"), Some(&None));
        assert_eq!(parsed.len(), 2);
    }
}
