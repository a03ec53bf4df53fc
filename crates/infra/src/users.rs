//! User persistence with email uniqueness.

use std::collections::HashMap;
use std::sync::RwLock;

use jobboard_auth::User;
use jobboard_core::{DomainError, DomainResult, UserId};

/// In-memory user store.
///
/// Unlike the other stores this one owns its map directly: the email
/// uniqueness check and the write must happen under one lock.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user; `Conflict` if the email is already registered.
    pub fn insert(&self, user: User) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;

        if map.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email already registered"));
        }
        map.insert(user.id, user);
        Ok(())
    }

    /// Persist changes to an existing user; `NotFound` if absent.
    ///
    /// The caller mutated a clone; re-check email uniqueness against every
    /// *other* record before writing it back.
    pub fn save(&self, user: User) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;

        if !map.contains_key(&user.id) {
            return Err(DomainError::not_found());
        }
        if map
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(DomainError::conflict("email already registered"));
        }
        map.insert(user.id, user);
        Ok(())
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    /// Case-insensitive email lookup (emails are stored lowercased).
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let normalized = email.trim().to_lowercase();
        let map = self.inner.read().ok()?;
        map.values().find(|u| u.email == normalized).cloned()
    }

    pub fn list(&self) -> Vec<User> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    pub fn remove(&self, id: &UserId) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::not_found())?;
        map.remove(id).map(|_| ()).ok_or_else(DomainError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User::register(UserId::new(), "Test", email, "hash".into(), vec![], Utc::now()).unwrap()
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let store = UserStore::new();
        store.insert(user("a@example.com")).unwrap();

        let result = store.insert(user("a@example.com"));
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn save_rejects_stealing_another_users_email() {
        let store = UserStore::new();
        store.insert(user("a@example.com")).unwrap();
        let mut b = user("b@example.com");
        store.insert(b.clone()).unwrap();

        b.email = "a@example.com".to_string();
        let result = store.save(b);
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn find_by_email_ignores_case() {
        let store = UserStore::new();
        let u = user("a@example.com");
        let id = u.id;
        store.insert(u).unwrap();

        assert_eq!(store.find_by_email("  A@Example.COM ").unwrap().id, id);
        assert!(store.find_by_email("missing@example.com").is_none());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let store = UserStore::new();
        assert_eq!(store.remove(&UserId::new()), Err(DomainError::NotFound));
    }
}
