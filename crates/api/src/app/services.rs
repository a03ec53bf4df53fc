//! Store wiring and the account flows (register/login/logout) shared by the
//! route handlers.

use chrono::Utc;

use jobboard_auth::{
    hash_password, roles, verify_password, Permission, Principal, ProfileUpdate, Role, User,
};
use jobboard_core::{DomainError, DomainResult, UserId};
use jobboard_infra::{ApplicationStore, JobStore, RoleDirectory, SessionStore, UserStore};

/// Shared application state: every store plus the role directory.
///
/// All stores are in-memory; handlers go through these methods for anything
/// that spans more than one store call.
#[derive(Debug)]
pub struct AppServices {
    pub users: UserStore,
    pub jobs: JobStore,
    pub applications: ApplicationStore,
    pub sessions: SessionStore,
    pub directory: RoleDirectory,
}

impl AppServices {
    pub fn new() -> Self {
        Self {
            users: UserStore::new(),
            jobs: JobStore::new(),
            applications: ApplicationStore::new(),
            sessions: SessionStore::new(),
            directory: RoleDirectory::seeded(),
        }
    }

    /// Ensure the bootstrap admin exists. Idempotent across restarts against
    /// a shared store; a no-op when the email is already registered.
    pub fn seed_admin(&self, email: &str, password: &str) -> DomainResult<()> {
        if self.users.find_by_email(email).is_some() {
            return Ok(());
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::validation(format!("password hashing failed: {e}")))?;
        let admin = User::register(
            UserId::new(),
            "Administrator",
            email,
            password_hash,
            vec![Role::new(roles::ADMIN)],
            Utc::now(),
        )?;

        tracing::info!(email = %admin.email, "seeded bootstrap admin");
        self.users.insert(admin)
    }

    /// Create an account (no session). Used by self-registration and by
    /// admin-side user creation.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: String,
        initial_roles: Vec<Role>,
    ) -> DomainResult<User> {
        let user = User::register(
            UserId::new(),
            name,
            email,
            password_hash,
            initial_roles,
            Utc::now(),
        )?;
        self.users.insert(user.clone())?;
        Ok(user)
    }

    /// Self-registration: create the account and open a session.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password_hash: String,
        initial_roles: Vec<Role>,
    ) -> DomainResult<(User, String)> {
        let user = self.create_user(name, email, password_hash, initial_roles)?;
        let token = self.sessions.issue(user.id);
        Ok((user, token))
    }

    /// Credential check + session issue.
    ///
    /// Every failure path returns `InvalidCredentials`, including a malformed
    /// stored hash: nothing can match it, and the caller learns nothing.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<(User, String)> {
        let user = self
            .users
            .find_by_email(email)
            .ok_or(DomainError::InvalidCredentials)?;

        let matches = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !matches {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.sessions.issue(user.id);
        Ok((user, token))
    }

    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Resolve a user record into the actor object policy decisions run on.
    pub fn principal_for(&self, user: &User) -> Principal {
        let effective = user.effective_permissions(|role| self.directory.role_permissions(role));
        Principal::new(user.id, user.roles.clone(), effective)
    }

    /// Full role replace. Every name must exist in the directory.
    pub fn assign_roles(&self, target: &UserId, names: &[String]) -> DomainResult<User> {
        for name in names {
            if !self.directory.role_exists(name) {
                return Err(DomainError::not_found());
            }
        }

        let mut user = self.users.get(target).ok_or_else(DomainError::not_found)?;
        user.assign_roles(names.iter().map(|n| Role::new(n.clone())).collect(), Utc::now());
        self.users.save(user.clone())?;
        Ok(user)
    }

    /// Additive direct permission grant. Every name must exist in the
    /// catalogue.
    pub fn grant_permissions(&self, target: &UserId, names: &[String]) -> DomainResult<User> {
        for name in names {
            if !self.directory.permission_exists(name) {
                return Err(DomainError::not_found());
            }
        }

        let mut user = self.users.get(target).ok_or_else(DomainError::not_found)?;
        user.grant_permissions(
            names.iter().map(|n| Permission::new(n.clone())).collect(),
            Utc::now(),
        );
        self.users.save(user.clone())?;
        Ok(user)
    }

    pub fn update_profile(&self, target: &UserId, update: ProfileUpdate) -> DomainResult<User> {
        let mut user = self.users.get(target).ok_or_else(DomainError::not_found)?;
        user.update_profile(update, Utc::now())?;
        self.users.save(user.clone())?;
        Ok(user)
    }

    /// Remove the account and kill its live sessions.
    pub fn delete_user(&self, target: &UserId) -> DomainResult<()> {
        self.users.remove(target)?;
        self.sessions.revoke_all_for(*target);
        Ok(())
    }
}
