//! User identity entity.
//!
//! # Invariants
//! - Emails are stored trimmed and lowercased; uniqueness is enforced by the
//!   user store, not here.
//! - Role assignment is a full replace; permission grants are additive.
//! - The direct permission set and the role set never contain duplicates.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{DomainError, DomainResult, UserId};

use crate::{Permission, Role};

const MAX_FIELD_LEN: usize = 255;

/// A registered account: identity, credential hash, and the role/permission
/// sets every authorization decision is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    /// Permissions granted directly to this user (role grants live in the
    /// role directory).
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Validate and construct a new account.
    ///
    /// `password_hash` must already be an Argon2id PHC string; this entity
    /// never sees plaintext credentials.
    pub fn register(
        id: UserId,
        name: &str,
        email: &str,
        password_hash: String,
        roles: Vec<Role>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = valid_name(name)?;
        let email = valid_email(email)?;

        let mut user = Self {
            id,
            name,
            email,
            password_hash,
            roles: Vec::new(),
            permissions: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        user.assign_roles(roles, now);
        Ok(user)
    }

    /// Partial profile update: only supplied fields change.
    pub fn update_profile(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = update.name {
            self.name = valid_name(&name)?;
        }
        if let Some(email) = update.email {
            self.email = valid_email(&email)?;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Replace the full role set with `roles` (deduplicated, order kept).
    ///
    /// Idempotent: assigning the current set again is a no-op besides the
    /// timestamp.
    pub fn assign_roles(&mut self, roles: Vec<Role>, now: DateTime<Utc>) {
        let mut seen = HashSet::new();
        self.roles = roles
            .into_iter()
            .filter(|r| seen.insert(r.as_str().to_string()))
            .collect();
        self.updated_at = now;
    }

    /// Add `permissions` to the direct grant set (existing grants kept).
    pub fn grant_permissions(&mut self, permissions: Vec<Permission>, now: DateTime<Utc>) {
        for perm in permissions {
            if !self.permissions.iter().any(|p| p.as_str() == perm.as_str()) {
                self.permissions.push(perm);
            }
        }
        self.updated_at = now;
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == name)
    }

    /// Effective permissions: direct grants plus everything granted by held
    /// roles, per the supplied role→permission mapping.
    pub fn effective_permissions<F>(&self, role_permissions: F) -> Vec<Permission>
    where
        F: Fn(&str) -> Vec<Permission>,
    {
        let mut names: HashSet<String> = HashSet::new();
        let mut effective = Vec::new();

        for perm in &self.permissions {
            if names.insert(perm.as_str().to_string()) {
                effective.push(perm.clone());
            }
        }
        for role in &self.roles {
            for perm in role_permissions(role.as_str()) {
                if names.insert(perm.as_str().to_string()) {
                    effective.push(perm);
                }
            }
        }

        effective
    }
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.len() > MAX_FIELD_LEN {
        return Err(DomainError::validation("name is too long"));
    }
    Ok(name.to_string())
}

fn valid_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    if email.len() > MAX_FIELD_LEN {
        return Err(DomainError::validation("email is too long"));
    }
    Ok(email)
}
