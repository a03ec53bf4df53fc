//! Session-token persistence.
//!
//! Only token digests are stored; the raw token exists client-side and in the
//! response that issued it.

use jobboard_auth::{generate_token, token_digest};
use jobboard_core::UserId;

use crate::store::InMemoryStore;

#[derive(Debug, Default)]
pub struct SessionStore {
    inner: InMemoryStore<String, UserId>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a session for `user_id` and return the raw bearer token.
    pub fn issue(&self, user_id: UserId) -> String {
        let raw = generate_token();
        self.inner.upsert(token_digest(&raw), user_id);
        raw
    }

    /// Resolve a raw bearer token to its user, if the session is live.
    pub fn resolve(&self, raw: &str) -> Option<UserId> {
        self.inner.get(&token_digest(raw))
    }

    /// Invalidate a session. Revoking an unknown token is a no-op.
    pub fn revoke(&self, raw: &str) {
        let _ = self.inner.remove(&token_digest(raw));
    }

    /// Invalidate every session belonging to `user_id` (used when the
    /// account is deleted).
    pub fn revoke_all_for(&self, user_id: UserId) {
        for (digest, _) in self
            .inner
            .entries()
            .into_iter()
            .filter(|(_, owner)| *owner == user_id)
        {
            let _ = self.inner.remove(&digest);
        }
    }
}
