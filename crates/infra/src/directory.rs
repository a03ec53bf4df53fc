//! The role directory: named roles, the permission catalogue, and the seeded
//! role→permission mapping.

use std::collections::{HashMap, HashSet};

use jobboard_auth::{permissions, roles, Permission};

/// Registry of the roles and permissions the system knows about.
///
/// Role and permission names referenced by assignment endpoints must exist
/// here; the catalogue is seeded at startup and fixed thereafter.
#[derive(Debug)]
pub struct RoleDirectory {
    roles: HashMap<&'static str, Vec<&'static str>>,
    permissions: HashSet<&'static str>,
}

impl RoleDirectory {
    /// The shipped directory.
    ///
    /// `user` carries no permissions: applying and browsing jobs are
    /// role-gated, not permission-gated.
    pub fn seeded() -> Self {
        let mut role_map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        role_map.insert(roles::USER, vec![]);
        role_map.insert(
            roles::EMPLOYER,
            vec![
                permissions::CREATE_JOBS,
                permissions::UPDATE_JOBS,
                permissions::DELETE_JOBS,
            ],
        );
        role_map.insert(
            roles::ADMIN,
            vec![
                permissions::VIEW_USERS,
                permissions::CREATE_USERS,
                permissions::UPDATE_USERS,
                permissions::DELETE_USERS,
                permissions::ASSIGN_ROLES,
            ],
        );

        let catalogue = role_map.values().flatten().copied().collect();

        Self {
            roles: role_map,
            permissions: catalogue,
        }
    }

    pub fn role_exists(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    pub fn permission_exists(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// Permissions granted by holding `role` (empty for unknown roles).
    pub fn role_permissions(&self, role: &str) -> Vec<Permission> {
        self.roles
            .get(role)
            .map(|perms| perms.iter().map(|p| Permission::new(*p)).collect())
            .unwrap_or_default()
    }
}
