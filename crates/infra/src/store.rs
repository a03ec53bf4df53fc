//! Generic in-memory keyed storage.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use jobboard_core::{DomainError, DomainResult};

/// In-memory keyed store used as the backing for the concrete stores.
///
/// Mutations take the write lock for their full duration, so check-then-write
/// sequences inside a single call are atomic.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    pub fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    /// Mutate the value under `key` in place, holding the write lock.
    ///
    /// Fails with `NotFound` if the key is absent; if the closure fails, the
    /// stored value is left untouched.
    pub fn update<F>(&self, key: &K, f: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>,
    {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::not_found())?;
        let value = map.get_mut(key).ok_or_else(DomainError::not_found)?;

        let mut candidate = value.clone();
        f(&mut candidate)?;
        *value = candidate.clone();
        Ok(candidate)
    }

    /// Remove the value under `key`; `NotFound` if absent.
    pub fn remove(&self, key: &K) -> DomainResult<V> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::not_found())?;
        map.remove(key).ok_or_else(DomainError::not_found)
    }

    pub fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    pub fn entries(&self) -> Vec<(K, V)> {
        match self.inner.read() {
            Ok(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Err(_) => vec![],
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rolls_back_on_closure_error() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.upsert(1, "before".to_string());

        let result = store.update(&1, |v| {
            v.push_str("-after");
            Err(DomainError::validation("nope"))
        });

        assert!(result.is_err());
        assert_eq!(store.get(&1).unwrap(), "before");
    }

    #[test]
    fn remove_missing_is_not_found() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        assert_eq!(store.remove(&7), Err(DomainError::NotFound));
    }
}
