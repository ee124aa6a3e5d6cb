//! Dynamic values flowing through a guard.
//!
//! Request inputs, prepared records and output records are all untyped maps
//! of JSON-like values. Key insertion order is preserved so records iterate in
//! schema order, but map equality ignores order.

use serde_json::Value;

/// A string-keyed map of dynamic values.
///
/// Used for raw request input, prepared records and output records alike.
pub type Record = serde_json::Map<String, Value>;

/// Coerces a value to the string form used for default comparison.
///
/// Query parameters always arrive as strings while defaults are usually
/// typed, so `"10"` must compare equal to the number `10`. The mapping is:
///
/// - strings are returned unchanged
/// - numbers use their decimal text
/// - booleans become `"true"` or `"false"`
/// - `null` becomes the empty string
/// - arrays and objects become compact JSON
///
/// Note that `null` and `""` coerce to the same text.
///
/// # Examples
///
/// ```
/// use request_guard::coerce_to_string;
/// use serde_json::json;
///
/// assert_eq!(coerce_to_string(&json!(10)), "10");
/// assert_eq!(coerce_to_string(&json!("10")), "10");
/// assert_eq!(coerce_to_string(&json!(null)), "");
/// ```
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
