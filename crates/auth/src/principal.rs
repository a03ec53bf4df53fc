use jobboard_core::UserId;

use crate::{Permission, Role};

/// A fully resolved actor for authorization decisions.
///
/// Construction is intentionally decoupled from storage and transport: the
/// API layer resolves the session token to a user record and builds this from
/// the user's current roles and **effective** permissions (direct grants plus
/// everything granted by held roles). Because it is rebuilt per request from
/// the store, role or permission changes are visible to the very next check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: UserId, roles: Vec<Role>, permissions: Vec<Permission>) -> Self {
        Self {
            user_id,
            roles,
            permissions,
        }
    }

    /// Coarse check: does the actor hold the named role?
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == name)
    }

    /// Fine-grained check: does the actor hold the named permission,
    /// directly or via any held role?
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.as_str() == name)
    }
}
