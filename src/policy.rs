/// An access requirement checked by an [`AccessGate`](crate::AccessGate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyReq {
    /// Requires a principal to be present
    Authenticated,
    /// Requires the principal to hold a permission for the action
    Authorized {
        /// The action the principal must be permitted to perform
        action: &'static str,
    },
}

/// Policy requiring authentication.
///
/// Use this to require that the guard was constructed with a principal.
pub struct Authenticated;

/// Policy requiring permission for a specific action.
///
/// Satisfied when the principal's permissions contain the action name (e.g.
/// `"posts.publish"`). Implies authentication.
pub struct Authorized {
    action: &'static str,
}

impl Authorized {
    /// Creates an authorization requirement for the given action.
    pub fn for_action(action: &'static str) -> Self {
        Self { action }
    }
}

impl From<Authenticated> for PolicyReq {
    fn from(_: Authenticated) -> Self {
        PolicyReq::Authenticated
    }
}

impl From<Authorized> for PolicyReq {
    fn from(auth: Authorized) -> Self {
        PolicyReq::Authorized {
            action: auth.action,
        }
    }
}
