//! Configuration for a guard pipeline.

use http::Method;

use crate::error::DEFAULT_UNAUTHORIZED_MESSAGE;

/// Order of the clean-query check and the authorization gate for read-only
/// requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckOrder {
    /// Redirect non-canonical queries before asking the guard for permission.
    #[default]
    CleanCheckFirst,
    /// Ask the guard for permission before checking the query.
    AuthorizeFirst,
}

/// Configuration for a [`Pipeline`](crate::Pipeline).
///
/// # Examples
///
/// ```
/// use request_guard::{CheckOrder, GuardConfig};
/// use http::Method;
///
/// let config = GuardConfig::new()
///     .with_read_only_method(Method::HEAD)
///     .with_check_order(CheckOrder::AuthorizeFirst)
///     .with_unauthorized_message("You may not edit this post");
///
/// assert!(config.is_read_only(&Method::HEAD));
/// assert!(!config.is_read_only(&Method::POST));
/// ```
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Methods whose requests read only the query string and undergo the
    /// clean-query check.
    pub read_only_methods: Vec<Method>,
    /// Relative order of clean-query check and authorization.
    pub check_order: CheckOrder,
    /// Message carried by [`AuthorizationError`](crate::AuthorizationError).
    pub unauthorized_message: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            read_only_methods: vec![Method::GET],
            check_order: CheckOrder::default(),
            unauthorized_message: DEFAULT_UNAUTHORIZED_MESSAGE.to_string(),
        }
    }
}

impl GuardConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat an additional method as read-only.
    pub fn with_read_only_method(mut self, method: Method) -> Self {
        if !self.read_only_methods.contains(&method) {
            self.read_only_methods.push(method);
        }
        self
    }

    /// Replace the set of read-only methods.
    pub fn with_read_only_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.read_only_methods = methods.into_iter().collect();
        self
    }

    /// Set the check order.
    pub fn with_check_order(mut self, order: CheckOrder) -> Self {
        self.check_order = order;
        self
    }

    /// Set the authorization failure message.
    pub fn with_unauthorized_message(mut self, message: impl Into<String>) -> Self {
        self.unauthorized_message = message.into();
        self
    }

    /// Returns true if requests with this method are read-only.
    pub fn is_read_only(&self, method: &Method) -> bool {
        self.read_only_methods.contains(method)
    }
}
