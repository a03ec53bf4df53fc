use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Job-posting capabilities granted to the `employer` role.
///
/// The space-separated spelling is historical and load-bearing: these names
/// are stored on user records and matched verbatim.
pub const CREATE_JOBS: &str = "create jobs";
pub const UPDATE_JOBS: &str = "update jobs";
pub const DELETE_JOBS: &str = "delete jobs";

/// User-administration capabilities granted to the `admin` role.
pub const VIEW_USERS: &str = "view-users";
pub const CREATE_USERS: &str = "create-users";
pub const UPDATE_USERS: &str = "update-users";
pub const DELETE_USERS: &str = "delete-users";
pub const ASSIGN_ROLES: &str = "assign-roles";

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "create jobs"); the full
/// catalogue lives in the role directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
