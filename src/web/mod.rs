//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and guard pipelines:
//! - [`GuardRequest`] is the narrow view of a request a pipeline reads
//! - [`RequestAdapter`] is an owned implementation for frameworks to convert into
//! - [`extract`] builds the raw input map a pipeline resolves fields against
//!
//! No framework-specific code lives here. Integrations either implement
//! `GuardRequest` for their own request type or convert into a
//! `RequestAdapter` (an `http::Request<Option<Record>>` converts directly).
//!
//! # Example Flow
//!
//! ```ignore
//! // In a framework-specific integration (e.g., axum, actix):
//! let mut request = RequestAdapter::from(http_request_with_parsed_body);
//! request.set_principal(session.principal());
//!
//! let guard = UpdatePostGuard::new(request.principal().cloned());
//! match pipeline.handle(&guard, &request) {
//!     Ok(record) => save(record.into_inner()),
//!     Err(GuardError::UncleanQuery(e)) => redirect(e.redirect_uri()),
//!     Err(e) => respond(e.status(), &e),
//! }
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::{extract, GuardRequest};
