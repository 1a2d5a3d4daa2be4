//! In-process session store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{SessionError, SessionStore};

/// Session store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn set_many(&self, entries: Vec<(&str, String)>) -> Result<(), SessionError> {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            map.insert(key.to_owned(), value);
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError> {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("auth_token", "abc".to_string()).unwrap();
        assert_eq!(store.get("auth_token").as_deref(), Some("abc"));

        store.remove("auth_token").unwrap();
        assert!(store.get("auth_token").is_none());
        // Removing again is a no-op.
        store.remove("auth_token").unwrap();
    }

    #[test]
    fn test_batch_operations() {
        let store = MemoryStore::new();
        store
            .set_many(vec![("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(store.len(), 2);

        store.remove_many(&["a", "b", "missing"]).unwrap();
        assert!(store.is_empty());
    }
}
