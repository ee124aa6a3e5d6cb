//! Canonical queries for read-only requests.
//!
//! A read-only request is *clean* when its query mentions only declared
//! fields and never restates a default. Unclean requests are answered with a
//! redirect to the canonical form, so every listing has exactly one URL.

use crate::error::UncleanQueryError;
use crate::schema::Schema;
use crate::value::{coerce_to_string, Record};
use crate::web::GuardRequest;

/// Computes the canonical form of a query.
///
/// Keeps only keys naming a schema field, then drops values equal to the
/// field default under string coercion (see [`Schema::remove_defaults`]).
///
/// # Examples
///
/// ```
/// use request_guard::{minimize_query, FieldSpec, Record, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field(FieldSpec::new("status").with_default("draft"))
///     .field(FieldSpec::new("page").with_default(1));
///
/// let query: Record = serde_json::from_value(json!({
///     "status": "published",
///     "page": "1",
///     "utm_source": "newsletter",
/// })).unwrap();
///
/// let minimized = minimize_query(&query, &schema);
/// assert_eq!(minimized, serde_json::from_value::<Record>(json!({"status": "published"})).unwrap());
/// ```
pub fn minimize_query(input: &Record, schema: &Schema) -> Record {
    let declared: Record = input
        .iter()
        .filter(|(key, _)| schema.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    schema.remove_defaults(&declared)
}

/// Renders a record as an `application/x-www-form-urlencoded` query string.
///
/// Values are string-coerced first, so nested values appear as compact JSON.
/// Pairs keep the record's iteration order.
///
/// # Examples
///
/// ```
/// use request_guard::{build_query_string, Record};
/// use serde_json::json;
///
/// let query: Record = serde_json::from_value(json!({"q": "rust web", "page": 2})).unwrap();
/// assert_eq!(build_query_string(&query), "q=rust+web&page=2");
/// ```
pub fn build_query_string(record: &Record) -> String {
    let pairs: Vec<(&str, String)> = record
        .iter()
        .map(|(key, value)| (key.as_str(), coerce_to_string(value)))
        .collect();

    // string pairs always serialize
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

/// Checks that a read-only request's input equals its canonical query.
///
/// `input` is the map produced by [`extract`](crate::web::extract). The
/// comparison is plain map equality on the original values: order does not
/// matter, presence and exact value do.
///
/// # Errors
///
/// Returns [`UncleanQueryError`] carrying the minimized map and the request
/// URI rewritten with the canonical query string.
pub fn check_clean<R>(request: &R, input: &Record, schema: &Schema) -> Result<(), UncleanQueryError>
where
    R: GuardRequest + ?Sized,
{
    let minimized = minimize_query(input, schema);
    if &minimized == input {
        return Ok(());
    }

    let redirect_uri = request.uri_with_query(&build_query_string(&minimized));
    Err(UncleanQueryError::new(minimized, redirect_uri))
}
