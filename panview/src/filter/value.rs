use std::collections::BTreeMap;

/// A field value as seen by the filter engine.
///
/// Enum-valued fields are read as [`FieldValue::Str`] holding their
/// configuration spelling, so operators never see a typed enum.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Record(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn text(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }

    pub fn list(values: &[String]) -> Self {
        FieldValue::List(values.to_vec())
    }

    /// Build a record from `(key, value)` pairs.
    pub fn record<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, FieldValue)>,
    {
        FieldValue::Record(
            fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    /// String coercion used by the textual operators.
    ///
    /// Lists join with `,`; records and nulls have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Null | FieldValue::Record(_) => None,
            FieldValue::Bool(value) => Some(value.to_string()),
            FieldValue::Int(value) => Some(value.to_string()),
            FieldValue::Float(value) => Some(value.to_string()),
            FieldValue::Str(value) => Some(value.clone()),
            FieldValue::List(values) => Some(values.join(",")),
        }
    }

    /// Numeric coercion used by `gt`/`lt`/`gte`/`lte`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            FieldValue::Str(value) => parse_number(value),
            _ => None,
        }
    }

    fn member(&self, key: &str) -> FieldValue {
        match self {
            FieldValue::Record(fields) => fields.get(key).cloned().unwrap_or(FieldValue::Null),
            _ => FieldValue::Null,
        }
    }

    fn at(&self, index: usize) -> FieldValue {
        match self {
            FieldValue::List(values) => values
                .get(index)
                .map(|value| FieldValue::Str(value.clone()))
                .unwrap_or(FieldValue::Null),
            _ => FieldValue::Null,
        }
    }
}

/// Parse an integer or float, tolerating surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(int as f64);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

impl From<&Option<String>> for FieldValue {
    fn from(value: &Option<String>) -> Self {
        match value {
            Some(value) => FieldValue::Str(value.clone()),
            None => FieldValue::Null,
        }
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Str(value.clone())
    }
}

impl From<&Vec<String>> for FieldValue {
    fn from(values: &Vec<String>) -> Self {
        FieldValue::List(values.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Option<bool>> for FieldValue {
    fn from(value: Option<bool>) -> Self {
        value.map(FieldValue::Bool).unwrap_or(FieldValue::Null)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(value as f64))
    }
}

impl From<Option<usize>> for FieldValue {
    fn from(value: Option<usize>) -> Self {
        value.map(FieldValue::from).unwrap_or(FieldValue::Null)
    }
}

/// Explicit per-field accessor implemented by every filterable object.
///
/// `read_field` answers for top-level field names only; nested access is
/// layered on top by [`read_path`]. Unknown names read as [`FieldValue::Null`].
pub trait FieldReadable {
    fn read_field(&self, name: &str) -> FieldValue;
}

/// Read a dotted path such as `destination_translation.translated_port`
/// or an indexed one such as `members[0]`.
pub fn read_path<T: FieldReadable + ?Sized>(item: &T, path: &str) -> FieldValue {
    let mut segments = path.split('.');
    let Some(first) = segments.next() else {
        return FieldValue::Null;
    };

    let (name, index) = split_index(first);
    let mut value = item.read_field(name);
    if let Some(index) = index {
        value = value.at(index);
    }

    for segment in segments {
        let (name, index) = split_index(segment);
        value = value.member(name);
        if let Some(index) = index {
            value = value.at(index);
        }
    }
    value
}

fn split_index(segment: &str) -> (&str, Option<usize>) {
    let Some(open) = segment.find('[') else {
        return (segment, None);
    };
    let Some(inner) = segment[open + 1..].strip_suffix(']') else {
        return (segment, None);
    };
    match inner.trim().parse::<usize>() {
        Ok(index) => (&segment[..open], Some(index)),
        Err(_) => (segment, None),
    }
}
