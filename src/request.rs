/// An authenticated user or service principal.
///
/// Guards capture the principal at construction and consult it from
/// [`RequestGuard::authorize`](crate::RequestGuard::authorize), usually through
/// an [`AccessGate`](crate::AccessGate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub name: String,
    /// Actions this principal may perform, e.g. `"posts.publish"`
    pub permissions: Vec<String>,
}

impl Principal {
    /// Creates a principal without permissions.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    /// Grants an additional permission.
    pub fn with_permission(mut self, action: impl Into<String>) -> Self {
        self.permissions.push(action.into());
        self
    }

    /// Returns true if the principal holds the given permission.
    pub fn has_permission(&self, action: &str) -> bool {
        self.permissions.iter().any(|p| p == action)
    }
}
