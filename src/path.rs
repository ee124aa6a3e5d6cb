use serde_json::Value;

use crate::value::Record;

/// Resolves a dotted path against a nested record.
///
/// Each `.`-separated segment descends one level into a nested object. If a
/// segment is missing, or the current value is not an object (arrays and
/// scalars are never indexed), `default` is returned. Resolution never fails
/// and never returns partial results.
///
/// A key that is present with a `null` value resolves to `null`, not to the
/// default.
///
/// # Examples
///
/// ```
/// use request_guard::{resolve, Record};
/// use serde_json::json;
///
/// let input: Record = serde_json::from_value(json!({
///     "meta": {"author": {"email": "a@b.com"}}
/// })).unwrap();
///
/// assert_eq!(resolve(&input, "meta.author.email", &json!(null)), json!("a@b.com"));
/// assert_eq!(resolve(&input, "meta.editor.email", &json!("none")), json!("none"));
/// ```
pub fn resolve(map: &Record, path: &str, default: &Value) -> Value {
    let mut segments = path.split('.');
    let mut current = match segments.next().and_then(|first| map.get(first)) {
        Some(value) => value,
        None => return default.clone(),
    };

    for segment in segments {
        current = match current {
            Value::Object(inner) => match inner.get(segment) {
                Some(value) => value,
                None => return default.clone(),
            },
            _ => return default.clone(),
        };
    }

    current.clone()
}
