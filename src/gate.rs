use crate::{error::AccessDenied, policy::PolicyReq, request::Principal};

/// Declarative access check for use inside
/// [`RequestGuard::authorize`](crate::RequestGuard::authorize).
///
/// A gate collects requirements against an optional principal and evaluates
/// them in the order they were added.
///
/// # Examples
///
/// ```
/// use request_guard::{AccessGate, Authenticated, Authorized, Principal};
///
/// let editor = Principal::new("user-1", "Alice").with_permission("posts.publish");
///
/// let gate = AccessGate::new(Some(&editor))
///     .require(Authenticated)
///     .require(Authorized::for_action("posts.publish"));
///
/// assert!(gate.allows());
/// assert!(!AccessGate::new(None).require(Authenticated).allows());
/// ```
#[derive(Debug)]
pub struct AccessGate<'a> {
    principal: Option<&'a Principal>,
    requirements: Vec<PolicyReq>,
}

impl<'a> AccessGate<'a> {
    /// Creates a gate for the given principal with no requirements.
    ///
    /// A gate without requirements allows everyone.
    pub fn new(principal: Option<&'a Principal>) -> Self {
        Self {
            principal,
            requirements: Vec::new(),
        }
    }

    /// Adds a requirement, deduplicating identical requirements.
    ///
    /// Returns the updated gate to allow method chaining.
    pub fn require(mut self, policy: impl Into<PolicyReq>) -> Self {
        let req = policy.into();

        if !self.requirements.contains(&req) {
            self.requirements.push(req);
        }

        self
    }

    /// Evaluates all requirements.
    ///
    /// # Errors
    ///
    /// Returns the [`AccessDenied`] reason of the first failing requirement.
    pub fn check(&self) -> Result<(), AccessDenied> {
        for req in &self.requirements {
            self.check_one(req)?;
        }
        Ok(())
    }

    /// Evaluates all requirements, returning the yes/no answer `authorize()`
    /// needs.
    ///
    /// The denial reason is logged at debug level.
    pub fn allows(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(denied) => {
                tracing::debug!(
                    principal = self.principal.map(|p| p.id.as_str()),
                    reason = %denied,
                    "access denied"
                );
                false
            }
        }
    }

    fn check_one(&self, req: &PolicyReq) -> Result<(), AccessDenied> {
        let principal = self.principal.ok_or(AccessDenied::Unauthenticated)?;

        match req {
            PolicyReq::Authenticated => Ok(()),
            PolicyReq::Authorized { action } => {
                if principal.has_permission(action) {
                    Ok(())
                } else {
                    Err(AccessDenied::MissingPermission { action: *action })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Authenticated, Authorized};

    fn editor() -> Principal {
        Principal::new("user-1", "Alice").with_permission("posts.update")
    }

    #[test]
    fn gate_without_requirements_allows_anonymous() {
        assert!(AccessGate::new(None).allows());
    }

    #[test]
    fn authenticated_requires_principal() {
        let err = AccessGate::new(None)
            .require(Authenticated)
            .check()
            .expect_err("no principal");

        assert_eq!(err, AccessDenied::Unauthenticated);
    }

    #[test]
    fn authorized_requires_permission() {
        let principal = editor();

        let allowed = AccessGate::new(Some(&principal)).require(Authorized::for_action("posts.update"));
        assert!(allowed.allows());

        let denied = AccessGate::new(Some(&principal)).require(Authorized::for_action("posts.delete"));
        assert_eq!(
            denied.check(),
            Err(AccessDenied::MissingPermission {
                action: "posts.delete"
            })
        );
        assert!(!denied.allows());
    }

    #[test]
    fn authorized_without_principal_is_unauthenticated() {
        let gate = AccessGate::new(None).require(Authorized::for_action("posts.update"));

        assert_eq!(gate.check(), Err(AccessDenied::Unauthenticated));
    }

    #[test]
    fn first_failing_requirement_is_reported() {
        let principal = Principal::new("user-2", "Bob");
        let gate = AccessGate::new(Some(&principal))
            .require(Authorized::for_action("posts.publish"))
            .require(Authorized::for_action("posts.delete"));

        assert_eq!(
            gate.check(),
            Err(AccessDenied::MissingPermission {
                action: "posts.publish"
            })
        );
    }

    #[test]
    fn requirements_are_deduplicated() {
        let principal = editor();
        let gate = AccessGate::new(Some(&principal))
            .require(Authenticated)
            .require(Authenticated)
            .require(Authorized::for_action("posts.update"))
            .require(Authorized::for_action("posts.update"));

        assert_eq!(gate.requirements.len(), 2);
    }
}
