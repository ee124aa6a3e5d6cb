use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::validator::ErrorMapping;
use crate::value::Record;

/// Message used when a guard denies a request and no override is configured.
pub const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

/// Errors that can terminate [`Pipeline::handle`](crate::Pipeline::handle).
///
/// Exactly one of three conditions; each carries the payload the HTTP layer
/// needs to render a response. Panics raised by user transforms or by
/// `authorize()` are not converted into this type.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardError {
    /// The guard's `authorize()` returned false.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// The validator reported at least one failing field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A read-only request carried a non-canonical query string.
    #[error(transparent)]
    UncleanQuery(#[from] UncleanQueryError),
}

impl GuardError {
    /// HTTP status the caller should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            GuardError::Authorization(e) => e.status(),
            GuardError::Validation(e) => e.status(),
            GuardError::UncleanQuery(e) => e.status(),
        }
    }
}

/// Raised when a guard denies the request.
///
/// # Examples
///
/// ```
/// use request_guard::AuthorizationError;
/// use http::StatusCode;
///
/// let err = AuthorizationError::default();
/// assert_eq!(err.message(), "Unauthorized request");
/// assert_eq!(err.status(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct AuthorizationError {
    message: String,
    #[serde(skip)]
    status: StatusCode,
}

impl AuthorizationError {
    /// Creates an authorization error with a custom message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::FORBIDDEN,
        }
    }

    /// Human-readable reason.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always `403 Forbidden`.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Default for AuthorizationError {
    fn default() -> Self {
        Self::new(DEFAULT_UNAUTHORIZED_MESSAGE)
    }
}

/// Raised when the validator returns a non-empty error mapping.
///
/// The mapping is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    errors: ErrorMapping,
    #[serde(skip)]
    status: StatusCode,
}

impl ValidationError {
    /// Wraps a validator's error mapping.
    pub fn new(errors: ErrorMapping) -> Self {
        Self {
            errors,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Field name to messages, exactly as the validator returned them.
    pub fn errors(&self) -> &ErrorMapping {
        &self.errors
    }

    /// Consumes the error, returning the mapping.
    pub fn into_errors(self) -> ErrorMapping {
        self.errors
    }

    /// Always `422 Unprocessable Entity`.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Raised when a read-only request's query differs from its canonical form.
///
/// Callers should redirect to [`redirect_uri`](Self::redirect_uri) instead of
/// processing the request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("query is not canonical, redirect to {redirect_uri}")]
pub struct UncleanQueryError {
    minimized: Record,
    redirect_uri: String,
    #[serde(skip)]
    status: StatusCode,
}

impl UncleanQueryError {
    /// Creates an unclean-query error from the canonical query and the URI
    /// that carries it.
    pub fn new(minimized: Record, redirect_uri: impl Into<String>) -> Self {
        Self {
            minimized,
            redirect_uri: redirect_uri.into(),
            status: StatusCode::FOUND,
        }
    }

    /// The canonical query: declared fields only, defaults stripped.
    pub fn minimized(&self) -> &Record {
        &self.minimized
    }

    /// Same scheme, host and path as the request, with the canonical query.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Always `302 Found`.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Reason an [`AccessGate`](crate::AccessGate) refused a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No principal was present.
    #[error("authentication required")]
    Unauthenticated,
    /// The principal lacks the permission for an action.
    #[error("missing permission for '{action}'")]
    MissingPermission {
        /// The action that was not permitted
        action: &'static str,
    },
}
