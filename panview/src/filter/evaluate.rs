//! Single-predicate evaluation.
//!
//! Nothing here fails: malformed numbers, invalid patterns and type
//! mismatches all evaluate to `false`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::filter::operator::Operator;
use crate::filter::value::{parse_number, FieldValue};

const REGEX_CACHE_LIMIT: usize = 512;

/// Compiled patterns keyed by `(pattern, case_sensitive)`; `None` marks an invalid pattern.
static REGEX_CACHE: Lazy<Mutex<HashMap<(String, bool), Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Evaluate one operator against an extracted field value.
///
/// `filter` is `None` when the caller asked for a null comparison. A null
/// field only matches `eq` against a null filter, `ne` against a present
/// one, and `gte`/`lte` against another null.
pub fn apply_operator(
    value: &FieldValue,
    filter: Option<&str>,
    op: Operator,
    case_sensitive: bool,
) -> bool {
    if value.is_null() {
        return match op {
            Operator::Eq | Operator::Gte | Operator::Lte => filter.is_none(),
            Operator::Ne => filter.is_some(),
            _ => false,
        };
    }
    let Some(filter) = filter else {
        return op == Operator::Ne;
    };

    match op {
        Operator::Eq => equals(value, filter, case_sensitive),
        Operator::Ne => !equals(value, filter, case_sensitive),
        Operator::Contains => contains(value, filter, case_sensitive),
        Operator::NotContains => !contains(value, filter, case_sensitive),
        Operator::StartsWith => {
            let needle = fold(filter, case_sensitive);
            any_text(value, |text| fold(text, case_sensitive).starts_with(&*needle))
        }
        Operator::EndsWith => {
            let needle = fold(filter, case_sensitive);
            any_text(value, |text| fold(text, case_sensitive).ends_with(&*needle))
        }
        Operator::In => member_of(value, filter, case_sensitive),
        Operator::NotIn => !member_of(value, filter, case_sensitive),
        Operator::Gt => compare(value, filter, |a, b| a > b),
        Operator::Lt => compare(value, filter, |a, b| a < b),
        Operator::Gte => compare(value, filter, |a, b| a >= b),
        Operator::Lte => compare(value, filter, |a, b| a <= b),
        Operator::Regex => match compiled(filter, case_sensitive) {
            Some(re) => any_text(value, |text| re.is_match(text)),
            None => false,
        },
    }
}

fn fold(text: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_lowercase())
    }
}

fn split_candidates(filter: &str) -> impl Iterator<Item = &str> {
    filter.split(',').map(str::trim).filter(|c| !c.is_empty())
}

/// Lists match if any element satisfies `test`; scalars use their text form.
fn any_text(value: &FieldValue, test: impl Fn(&str) -> bool) -> bool {
    match value {
        FieldValue::List(items) => items.iter().any(|item| test(item)),
        other => other.as_text().is_some_and(|text| test(&text)),
    }
}

fn contains(value: &FieldValue, filter: &str, case_sensitive: bool) -> bool {
    let needle = fold(filter, case_sensitive);
    any_text(value, |text| fold(text, case_sensitive).contains(&*needle))
}

fn equals(value: &FieldValue, filter: &str, case_sensitive: bool) -> bool {
    match value {
        FieldValue::Bool(flag) => parse_bool(filter) == Some(*flag),
        FieldValue::Int(_) | FieldValue::Float(_) => {
            match (value.as_number(), parse_number(filter)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        FieldValue::List(items) => {
            let wanted: Vec<Cow<'_, str>> = split_candidates(filter)
                .map(|c| fold(c, case_sensitive))
                .collect();
            wanted.len() == items.len()
                && items
                    .iter()
                    .zip(&wanted)
                    .all(|(item, want)| fold(item, case_sensitive) == *want)
        }
        FieldValue::Str(text) => fold(text, case_sensitive) == fold(filter, case_sensitive),
        FieldValue::Null | FieldValue::Record(_) => false,
    }
}

fn member_of(value: &FieldValue, filter: &str, case_sensitive: bool) -> bool {
    let candidates: Vec<Cow<'_, str>> = split_candidates(filter)
        .map(|c| fold(c, case_sensitive))
        .collect();
    match value {
        FieldValue::List(items) => items
            .iter()
            .any(|item| is_candidate(&candidates, item, case_sensitive)),
        FieldValue::Record(_) | FieldValue::Null => false,
        other => other
            .as_text()
            .is_some_and(|text| is_candidate(&candidates, &text, case_sensitive)),
    }
}

fn is_candidate(candidates: &[Cow<'_, str>], text: &str, case_sensitive: bool) -> bool {
    let folded = fold(text, case_sensitive);
    candidates.iter().any(|candidate| *candidate == folded)
}

fn compare(value: &FieldValue, filter: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (value.as_number(), parse_number(filter)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn compiled(pattern: &str, case_sensitive: bool) -> Option<Regex> {
    let key = (pattern.to_string(), case_sensitive);
    let mut cache = match REGEX_CACHE.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(entry) = cache.get(&key) {
        return entry.clone();
    }

    let built = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build();
    let entry = match built {
        Ok(re) => Some(re),
        Err(err) => {
            debug!(pattern, %err, "invalid regex filter; predicate evaluates to false");
            None
        }
    };
    if cache.len() >= REGEX_CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(key, entry.clone());
    entry
}

#[cfg(test)]
mod tests {
    use super::apply_operator;
    use crate::filter::operator::Operator;
    use crate::filter::value::FieldValue;

    fn s(v: &str) -> FieldValue {
        FieldValue::text(v)
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|i| i.to_string()).collect())
    }

    #[test]
    fn null_values_only_match_null_aware_operators() {
        let null = FieldValue::Null;
        assert!(apply_operator(&null, None, Operator::Eq, false));
        assert!(!apply_operator(&null, Some("x"), Operator::Eq, false));
        assert!(apply_operator(&null, Some("x"), Operator::Ne, false));
        assert!(!apply_operator(&null, None, Operator::Ne, false));
        assert!(apply_operator(&null, None, Operator::Gte, false));
        assert!(apply_operator(&null, None, Operator::Lte, false));
        assert!(!apply_operator(&null, None, Operator::Gt, false));
        assert!(!apply_operator(&null, Some("x"), Operator::Contains, false));
    }

    #[test]
    fn null_filter_against_present_value() {
        assert!(!apply_operator(&s("tcp"), None, Operator::Eq, false));
        assert!(apply_operator(&s("tcp"), None, Operator::Ne, false));
        assert!(!apply_operator(&s("tcp"), None, Operator::Contains, false));
    }

    #[test]
    fn string_operators_fold_case_unless_sensitive() {
        assert!(apply_operator(&s("Web-Server"), Some("web"), Operator::Contains, false));
        assert!(!apply_operator(&s("Web-Server"), Some("web"), Operator::Contains, true));
        assert!(apply_operator(&s("Web-Server"), Some("SERVER"), Operator::EndsWith, false));
        assert!(apply_operator(&s("Web-Server"), Some("web-"), Operator::StartsWith, false));
        assert!(apply_operator(&s("Web"), Some("WEB"), Operator::Eq, false));
        assert!(!apply_operator(&s("Web"), Some("WEB"), Operator::Eq, true));
        assert!(apply_operator(&s("web"), Some("db"), Operator::NotContains, false));
    }

    #[test]
    fn in_splits_filter_for_scalars_and_tests_membership_for_lists() {
        assert!(apply_operator(&s("tcp"), Some("udp, TCP"), Operator::In, false));
        assert!(!apply_operator(&s("sctp"), Some("udp,tcp"), Operator::In, false));
        assert!(apply_operator(&s("sctp"), Some("udp,tcp"), Operator::NotIn, false));
        assert!(apply_operator(&list(&["prod", "web"]), Some("Prod"), Operator::In, false));
        assert!(!apply_operator(&list(&["dev"]), Some("prod"), Operator::In, false));
        assert!(apply_operator(&list(&["dev"]), Some("prod"), Operator::NotIn, false));
    }

    #[test]
    fn numeric_operators_coerce_or_fail_closed() {
        assert!(apply_operator(&s("8080"), Some("1024"), Operator::Gte, false));
        assert!(!apply_operator(&s("80"), Some("1024"), Operator::Gte, false));
        assert!(apply_operator(&FieldValue::Int(3), Some("2.5"), Operator::Gt, false));
        assert!(!apply_operator(&s("8080-8090"), Some("1024"), Operator::Gt, false));
        assert!(!apply_operator(&s("8080"), Some("high"), Operator::Lt, false));
        assert!(!apply_operator(&list(&["1"]), Some("0"), Operator::Gt, false));
    }

    #[test]
    fn regex_matches_and_invalid_patterns_are_false() {
        let pattern = Some("^web-[0-9]+$");
        assert!(apply_operator(&s("web-1"), pattern, Operator::Regex, true));
        assert!(!apply_operator(&s("web-01a"), pattern, Operator::Regex, true));
        assert!(!apply_operator(&s("db-1"), pattern, Operator::Regex, true));
        assert!(!apply_operator(&s("WEB-1"), pattern, Operator::Regex, true));
        assert!(apply_operator(&s("WEB-1"), pattern, Operator::Regex, false));
        assert!(!apply_operator(&s("web-1"), Some("(unclosed"), Operator::Regex, true));
    }

    #[test]
    fn booleans_accept_yes_no_spelling() {
        assert!(apply_operator(&FieldValue::Bool(true), Some("yes"), Operator::Eq, false));
        assert!(apply_operator(&FieldValue::Bool(false), Some("true"), Operator::Ne, false));
        assert!(!apply_operator(&FieldValue::Bool(true), Some("maybe"), Operator::Eq, false));
    }

    #[test]
    fn list_equality_is_ordered_and_complete() {
        let apps = list(&["web-browsing", "ssl"]);
        assert!(apply_operator(&apps, Some("web-browsing,ssl"), Operator::Eq, false));
        assert!(!apply_operator(&apps, Some("ssl,web-browsing"), Operator::Eq, false));
        assert!(!apply_operator(&apps, Some("ssl"), Operator::Eq, false));
        assert!(apply_operator(&apps, Some("brows"), Operator::Contains, false));
    }
}
