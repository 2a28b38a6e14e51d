use std::fmt;
use std::str::FromStr;

/// A comparison operator named by the suffix of a filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Eq,
    Ne,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    Gt,
    Lt,
    Gte,
    Lte,
    Regex,
}

impl Operator {
    pub const ALL: [Operator; 13] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::In,
        Operator::NotIn,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::Regex,
    ];

    /// Operator used when a key names no known suffix.
    pub const DEFAULT: Operator = Operator::Contains;

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Regex => "regex",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Lt | Operator::Gte | Operator::Lte
        )
    }

    /// Numeric comparisons and regex ignore the field's case-insensitivity.
    pub fn respects_case_folding(&self) -> bool {
        !self.is_numeric() && *self != Operator::Regex
    }

    /// Every operator ordered by suffix length, longest first, so that
    /// `not_contains` is tried before `contains` and `not_in` before `in`.
    pub fn by_suffix_length() -> [Operator; 13] {
        let mut ops = Self::ALL;
        ops.sort_by(|a, b| {
            b.as_str()
                .len()
                .cmp(&a.as_str().len())
                .then_with(|| a.cmp(b))
        });
        ops
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator '{s}'"))
    }
}

/// Split a flat filter key like `name_not_in` into field and operator.
///
/// Keys without a recognised `_<operator>` suffix name the field as-is and
/// default to [`Operator::Contains`].
pub fn split_filter_key(key: &str) -> (&str, Operator) {
    for op in Operator::by_suffix_length() {
        let Some(field) = key.strip_suffix(op.as_str()) else {
            continue;
        };
        let Some(field) = field.strip_suffix('_') else {
            continue;
        };
        if !field.is_empty() {
            return (field, op);
        }
    }
    (key, Operator::DEFAULT)
}
