//! Ordered field schemas and their default-value helpers.

use serde_json::Value;

use crate::field::FieldSpec;
use crate::validator::RuleMap;
use crate::value::{coerce_to_string, Record};

/// An ordered set of [`FieldSpec`]s with unique names.
///
/// Order only decides iteration order (and therefore the order of output
/// records and rule maps).
///
/// # Examples
///
/// ```
/// use request_guard::{FieldSpec, Schema};
///
/// let schema = Schema::new()
///     .field(FieldSpec::new("title").with_rule("required"))
///     .field(FieldSpec::new("status").with_default("draft"));
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.get("status").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field and returns the schema for chaining.
    ///
    /// # Panics
    ///
    /// Panics if a field with the same name is already present.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        assert!(
            self.get(spec.name()).is_none(),
            "duplicate field name {:?} in schema",
            spec.name()
        );
        self.fields.push(spec);
        self
    }

    /// Looks up a field by output name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns true if a field with this output name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in schema order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field name to default value, omitting fields whose default is `null`.
    pub fn defaults(&self) -> Record {
        self.fields
            .iter()
            .filter(|f| !f.default_value().is_null())
            .map(|f| (f.name().to_string(), f.default_value().clone()))
            .collect()
    }

    /// Drops every entry of `input` that merely restates a field default.
    ///
    /// A key is dropped when its field has a non-null default and the string
    /// coercions of value and default are equal (see
    /// [`coerce_to_string`](crate::coerce_to_string)). Keys without a matching
    /// field, or whose field has no default, are kept.
    pub fn remove_defaults(&self, input: &Record) -> Record {
        input
            .iter()
            .filter(|(key, value)| !self.is_default(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Rule map for every field with a non-empty rule, in schema order.
    pub fn rules(&self) -> RuleMap {
        self.fields
            .iter()
            .filter_map(|f| match f.rule() {
                Some(rule) if !rule.is_empty() => Some((f.name().to_string(), rule.to_string())),
                _ => None,
            })
            .collect()
    }

    fn is_default(&self, key: &str, value: &Value) -> bool {
        match self.get(key) {
            Some(field) if !field.default_value().is_null() => {
                coerce_to_string(value) == coerce_to_string(field.default_value())
            }
            _ => false,
        }
    }
}

impl FromIterator<FieldSpec> for Schema {
    /// Collects fields into a schema.
    ///
    /// # Panics
    ///
    /// Panics on duplicate field names, like [`Schema::field`].
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        iter.into_iter().fold(Schema::new(), Schema::field)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
