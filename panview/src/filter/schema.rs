use serde::Serialize;

use crate::filter::operator::Operator;
use crate::filter::value::{read_path, FieldReadable, FieldValue};

/// Declared type of a filterable field; decides the default operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    List,
    Number,
    Boolean,
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::In,
    Operator::NotIn,
    Operator::Regex,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Gte,
    Operator::Lte,
    Operator::In,
    Operator::NotIn,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Eq, Operator::Ne];

/// Text operators plus numeric comparisons, for string fields holding numbers (ports).
pub const NUMERIC_TEXT_OPERATORS: &[Operator] = &Operator::ALL;

/// Equality and membership only, for enum-like fields.
pub const ENUM_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::In,
    Operator::NotIn,
];

impl FieldType {
    pub fn default_operators(&self) -> &'static [Operator] {
        match self {
            FieldType::String | FieldType::List => TEXT_OPERATORS,
            FieldType::Number => NUMBER_OPERATORS,
            FieldType::Boolean => BOOLEAN_OPERATORS,
        }
    }
}

/// Computes a logical field from the whole object.
pub type Extractor<T> = fn(&T) -> FieldValue;

/// One filterable field of an object category.
pub struct FieldDef<T> {
    pub name: &'static str,
    /// Underlying field path: dotted for nested records, `name[idx]` for list items.
    pub path: &'static str,
    pub operators: &'static [Operator],
    pub case_sensitive: bool,
    pub field_type: FieldType,
    pub extractor: Option<Extractor<T>>,
}

impl<T: FieldReadable> FieldDef<T> {
    /// A field read from the same-named underlying field.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            path: name,
            operators: field_type.default_operators(),
            case_sensitive: false,
            field_type,
            extractor: None,
        }
    }

    /// A field computed by `extractor` instead of a path lookup.
    pub fn computed(name: &'static str, field_type: FieldType, extractor: Extractor<T>) -> Self {
        Self {
            extractor: Some(extractor),
            ..Self::new(name, field_type)
        }
    }

    pub fn path(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    pub fn operators(mut self, operators: &'static [Operator]) -> Self {
        self.operators = operators;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    pub fn allows(&self, op: Operator) -> bool {
        self.operators.contains(&op)
    }

    pub fn extract(&self, item: &T) -> FieldValue {
        match self.extractor {
            Some(extractor) => extractor(item),
            None => read_path(item, self.path),
        }
    }
}

/// The immutable set of filterable fields for one object category.
pub struct FilterSchema<T> {
    category: &'static str,
    fields: Vec<FieldDef<T>>,
}

impl<T: FieldReadable> FilterSchema<T> {
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, def: FieldDef<T>) -> Self {
        self.fields.retain(|existing| existing.name != def.name);
        self.fields.push(def);
        self
    }

    /// Add plain fields of one type in a single call.
    pub fn fields_of(mut self, field_type: FieldType, names: &[&'static str]) -> Self {
        for name in names {
            self = self.field(FieldDef::new(*name, field_type));
        }
        self
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef<T>> {
        self.fields.iter().find(|def| def.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef<T>> {
        self.fields.iter()
    }

    /// Serializable description of every field, in declaration order.
    pub fn describe(&self) -> Vec<FieldInfo> {
        self.fields
            .iter()
            .map(|def| FieldInfo {
                name: def.name,
                path: def.extractor.is_none().then_some(def.path),
                field_type: def.field_type,
                operators: def.operators.iter().map(Operator::as_str).collect(),
                case_sensitive: def.case_sensitive,
                computed: def.extractor.is_some(),
            })
            .collect()
    }
}

/// Read-only view of a [`FieldDef`] for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    pub path: Option<&'static str>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub operators: Vec<&'static str>,
    pub case_sensitive: bool,
    pub computed: bool,
}

/// An object category with a registered schema.
pub trait Filterable: FieldReadable + Sized + 'static {
    fn schema() -> &'static FilterSchema<Self>;
}
