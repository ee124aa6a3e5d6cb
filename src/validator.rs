use indexmap::IndexMap;

use crate::value::Record;

/// Field name to rule string, e.g. `"title" => "required|string|max:100"`.
pub type RuleMap = IndexMap<String, String>;

/// Custom message overrides handed to the validator, keyed however the
/// validator expects (commonly `"field.rule"`).
pub type MessageMap = IndexMap<String, String>;

/// Field name to ordered list of human-readable messages. Empty means valid.
pub type ErrorMapping = IndexMap<String, Vec<String>>;

/// The validation engine a [`Pipeline`](crate::Pipeline) delegates to.
///
/// The rule language is opaque to this crate. Implementations receive the
/// prepared record, the rule for every field that declared one, and the
/// guard's custom messages, and return every failure they found.
///
/// Implementations used from a shared pipeline must be safe to call from
/// several threads at once.
///
/// Any closure with the right signature is a validator:
///
/// ```
/// use request_guard::{ErrorMapping, MessageMap, Record, RuleMap, Validator};
///
/// let required = |data: &Record, rules: &RuleMap, _messages: &MessageMap| {
///     let mut errors = ErrorMapping::new();
///     for (field, rule) in rules {
///         if rule.contains("required") && data.get(field).map_or(true, |v| v.is_null()) {
///             errors.entry(field.clone()).or_default().push(format!("{field} is required"));
///         }
///     }
///     errors
/// };
///
/// let mut rules = RuleMap::new();
/// rules.insert("title".to_string(), "required".to_string());
///
/// let errors = required.validate(&Record::new(), &rules, &MessageMap::new());
/// assert_eq!(errors["title"], vec!["title is required".to_string()]);
/// ```
pub trait Validator {
    /// Validates `data` against `rules`, returning an empty mapping on success.
    fn validate(&self, data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping;
}

impl<F> Validator for F
where
    F: Fn(&Record, &RuleMap, &MessageMap) -> ErrorMapping,
{
    fn validate(&self, data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping {
        self(data, rules, messages)
    }
}

/// A validator that accepts every record.
///
/// **WARNING:** performs no validation. Useful in tests and for guards whose
/// fields carry no rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllValidator;

impl Validator for AcceptAllValidator {
    fn validate(&self, _data: &Record, _rules: &RuleMap, _messages: &MessageMap) -> ErrorMapping {
        ErrorMapping::new()
    }
}

/// A validator that rejects every field carrying a rule (for testing error
/// paths).
///
/// Each ruled field gets one message: the custom message registered under the
/// field name if present, otherwise `"The {field} field is invalid."`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAllValidator;

impl Validator for RejectAllValidator {
    fn validate(&self, _data: &Record, rules: &RuleMap, messages: &MessageMap) -> ErrorMapping {
        rules
            .keys()
            .map(|field| {
                let message = messages
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                (field.clone(), vec![message])
            })
            .collect()
    }
}
