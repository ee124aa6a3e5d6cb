//! The request boundary and input extraction.

use http::Method;

use crate::config::GuardConfig;
use crate::value::Record;

/// The view of an HTTP request a guard pipeline needs.
///
/// Framework integrations implement this for their request type, or convert
/// into [`RequestAdapter`](super::RequestAdapter), which already implements it.
///
/// # Examples
///
/// ```
/// use request_guard::web::GuardRequest;
/// use request_guard::Record;
/// use http::Method;
///
/// struct MyFrameworkRequest {
///     method: Method,
///     path: String,
///     query: Record,
/// }
///
/// impl GuardRequest for MyFrameworkRequest {
///     fn method(&self) -> &Method {
///         &self.method
///     }
///
///     fn query(&self) -> &Record {
///         &self.query
///     }
///
///     fn body(&self) -> Option<&Record> {
///         None
///     }
///
///     fn uri_with_query(&self, query: &str) -> String {
///         if query.is_empty() {
///             self.path.clone()
///         } else {
///             format!("{}?{}", self.path, query)
///         }
///     }
/// }
/// ```
pub trait GuardRequest {
    /// The HTTP method.
    fn method(&self) -> &Method;

    /// Parsed query parameters.
    fn query(&self) -> &Record;

    /// Parsed body parameters, if the request carried a body.
    fn body(&self) -> Option<&Record>;

    /// The request URI with its query string replaced by `query`.
    ///
    /// Scheme, host and path are kept. An empty `query` yields a URI without
    /// `?`.
    fn uri_with_query(&self, query: &str) -> String;
}

/// Builds the raw input map for a request.
///
/// Read-only requests (see [`GuardConfig::is_read_only`]) contribute their
/// query parameters only. Other requests contribute query and body
/// parameters, with body values replacing query values on key collision. A
/// missing body counts as empty.
///
/// # Examples
///
/// ```
/// use request_guard::web::{extract, RequestAdapter};
/// use request_guard::GuardConfig;
/// use http::{Method, Uri};
/// use serde_json::json;
///
/// let mut body = request_guard::Record::new();
/// body.insert("title".to_string(), json!("from body"));
///
/// let mut request = RequestAdapter::new(Method::POST, Uri::from_static("/posts?title=q&draft=1"));
/// request.set_body(Some(body));
///
/// let input = extract(&request, &GuardConfig::default());
/// assert_eq!(input["title"], json!("from body"));
/// assert_eq!(input["draft"], json!("1"));
/// ```
pub fn extract<R>(request: &R, config: &GuardConfig) -> Record
where
    R: GuardRequest + ?Sized,
{
    let mut input = request.query().clone();
    if config.is_read_only(request.method()) {
        return input;
    }

    if let Some(body) = request.body() {
        for (key, value) in body {
            input.insert(key.clone(), value.clone());
        }
    }
    input
}
