//! Declarative request validation and authorization guards.
//!
//! A guard turns an untrusted HTTP request into one sanitized, validated,
//! authorized record, or fails with a typed error. Each endpoint declares:
//! - **Fields**: a [`Schema`] of [`FieldSpec`]s naming the output keys, where
//!   each value is read from, its default, its validation rule and optional
//!   pre/post transforms
//! - **Authorization**: a yes/no [`RequestGuard::authorize`] predicate over
//!   context captured when the guard was built
//! - **Messages**: custom validation messages for the [`Validator`]
//!
//! A [`Pipeline`] runs a guard against a request: extract the input, redirect
//! non-canonical read-only queries, authorize, map and pre-process fields,
//! validate, post-process. The validation rule language and the HTTP server
//! stay outside this crate, behind the [`Validator`] and
//! [`web::GuardRequest`] traits.
//!
//! # Core Types
//!
//! - [`FieldSpec`]: immutable, copy-on-write field description
//! - [`Schema`]: ordered, name-unique set of fields
//! - [`RequestGuard`]: the per-endpoint capability interface
//! - [`Pipeline`]: the orchestrator
//! - [`GuardError`]: the three failure kinds
//! - [`Verified<T>`]: output that went through a guard
//!
//! # Examples
//!
//! ```
//! use request_guard::web::RequestAdapter;
//! use request_guard::{
//!     ErrorMapping, FieldSpec, GuardError, MessageMap, Pipeline, Record, RequestGuard, RuleMap,
//!     Schema,
//! };
//! use http::{Method, Uri};
//! use serde_json::{json, Value};
//!
//! struct CreatePost;
//!
//! impl RequestGuard for CreatePost {
//!     fn fields(&self) -> Schema {
//!         Schema::new()
//!             .field(
//!                 FieldSpec::new("title")
//!                     .with_rule("required")
//!                     .with_pre_transform(|v| match v {
//!                         Value::String(s) => Value::String(s.trim().to_string()),
//!                         other => other,
//!                     }),
//!             )
//!             .field(FieldSpec::new("author_email").with_source_path("meta.author.email"))
//!     }
//! }
//!
//! // A toy validator understanding only `required`.
//! let validator = |data: &Record, rules: &RuleMap, _: &MessageMap| {
//!     let mut errors = ErrorMapping::new();
//!     for (field, rule) in rules {
//!         let missing = data.get(field).map_or(true, |v| v.is_null() || v == "");
//!         if rule == "required" && missing {
//!             errors.insert(field.clone(), vec![format!("The {field} field is required.")]);
//!         }
//!     }
//!     errors
//! };
//! let pipeline = Pipeline::new(validator);
//!
//! let mut request = RequestAdapter::new(Method::POST, Uri::from_static("/posts"));
//! request.set_body(Some(serde_json::from_value(json!({
//!     "title": "  Hello  ",
//!     "meta": {"author": {"email": "a@b.com"}},
//! })).unwrap()));
//!
//! let record = pipeline.handle(&CreatePost, &request).unwrap().into_inner();
//! assert_eq!(record["title"], json!("Hello"));
//! assert_eq!(record["author_email"], json!("a@b.com"));
//!
//! let mut empty = RequestAdapter::new(Method::POST, Uri::from_static("/posts"));
//! empty.set_body(Some(serde_json::from_value(json!({"title": "   "})).unwrap()));
//! assert!(matches!(
//!     pipeline.handle(&CreatePost, &empty),
//!     Err(GuardError::Validation(_))
//! ));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod field;
mod gate;
mod guard;
mod logging;
mod path;
mod pipeline;
mod policy;
mod query;
mod request;
mod schema;
mod validator;
mod value;
mod verified;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use config::{CheckOrder, GuardConfig};
pub use error::{
    AccessDenied, AuthorizationError, GuardError, UncleanQueryError, ValidationError,
    DEFAULT_UNAUTHORIZED_MESSAGE,
};
pub use field::{FieldSpec, Transform};
pub use gate::AccessGate;
pub use guard::RequestGuard;
pub use logging::Stage;
pub use path::resolve;
pub use pipeline::{postprocess, prepare, Pipeline};
pub use policy::{Authenticated, Authorized, PolicyReq};
pub use query::{build_query_string, check_clean, minimize_query};
pub use request::Principal;
pub use schema::Schema;
pub use validator::{
    AcceptAllValidator, ErrorMapping, MessageMap, RejectAllValidator, RuleMap, Validator,
};
pub use value::{coerce_to_string, Record};
pub use verified::Verified;
