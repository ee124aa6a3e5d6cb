//! Request adapter for mapping HTTP requests to guard inputs.

use http::uri::Scheme;
use http::{header, Method, Uri};
use serde_json::Value;

use crate::request::Principal;
use crate::value::Record;

use super::GuardRequest;

/// Owned, framework-agnostic request implementing [`GuardRequest`].
///
/// The query string of the URI is parsed once at construction; every query
/// value is a string. Repeated keys keep the last occurrence and bracket
/// notation (`tags[]=a`) is not expanded.
///
/// Redirect URIs are fully qualified whenever the host is known: either the
/// URI is in absolute form, or a host was set (the `Host` header when
/// converting from [`http::Request`]). The scheme is taken from the URI, else
/// from [`set_scheme`](Self::set_scheme), defaulting to `http`.
///
/// # Notes
///
/// Percent-decoding is lossy: invalid UTF-8 such as `%FF` decodes to
/// `U+FFFD`. A query string that cannot be parsed at all is logged at debug
/// level and treated as empty.
///
/// # Examples
///
/// ```
/// use request_guard::web::{GuardRequest, RequestAdapter};
/// use request_guard::Principal;
/// use http::{Method, Uri};
/// use serde_json::json;
///
/// let mut adapter = RequestAdapter::new(
///     Method::GET,
///     Uri::from_static("https://blog.example.com/posts?status=draft&page=2"),
/// );
/// adapter.set_principal(Some(Principal::new("user-1", "Alice")));
///
/// assert_eq!(adapter.query()["page"], json!("2"));
/// assert_eq!(
///     adapter.uri_with_query("page=2"),
///     "https://blog.example.com/posts?page=2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    method: Method,
    uri: Uri,
    query: Record,
    body: Option<Record>,
    principal: Option<Principal>,
    scheme: Scheme,
    host: Option<String>,
}

impl RequestAdapter {
    /// Creates an adapter for the given method and URI, without body or
    /// principal.
    pub fn new(method: Method, uri: Uri) -> Self {
        let query = parse_query(uri.query());
        Self {
            method,
            uri,
            query,
            body: None,
            principal: None,
            scheme: Scheme::HTTP,
            host: None,
        }
    }

    /// Sets the parsed request body.
    pub fn set_body(&mut self, body: Option<Record>) {
        self.body = body;
    }

    /// Sets the authenticated principal for this request.
    ///
    /// This should be called after successful authentication, typically by
    /// framework-specific middleware.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Adds or replaces a query parameter.
    ///
    /// Only the parsed query changes; [`uri`](Self::uri) keeps the original
    /// query string.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.query.insert(key.into(), value.into());
    }

    /// Sets the host used for redirect URIs when the URI has no authority.
    pub fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    /// Sets the scheme used for redirect URIs when the URI has none, e.g.
    /// behind a TLS-terminating proxy.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        self.scheme = scheme;
    }

    /// Returns the request URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns a reference to the principal, if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

impl GuardRequest for RequestAdapter {
    fn method(&self) -> &Method {
        &self.method
    }

    fn query(&self) -> &Record {
        &self.query
    }

    fn body(&self) -> Option<&Record> {
        self.body.as_ref()
    }

    fn uri_with_query(&self, query: &str) -> String {
        let mut uri = String::new();
        let authority = self
            .uri
            .authority()
            .map(|a| a.as_str())
            .or(self.host.as_deref());
        if let Some(authority) = authority {
            uri.push_str(self.uri.scheme_str().unwrap_or(self.scheme.as_str()));
            uri.push_str("://");
            uri.push_str(authority);
        }
        uri.push_str(self.uri.path());
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(query);
        }
        uri
    }
}

impl From<http::Request<Option<Record>>> for RequestAdapter {
    fn from(request: http::Request<Option<Record>>) -> Self {
        let (parts, body) = request.into_parts();
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut adapter = RequestAdapter::new(parts.method, parts.uri);
        adapter.set_host(host);
        adapter.set_body(body);
        adapter
    }
}

fn parse_query(query: Option<&str>) -> Record {
    let Some(query) = query else {
        return Record::new();
    };

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(err) => {
            tracing::debug!(error = %err, "unparseable query string, treating as empty");
            Vec::new()
        }
    };

    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
