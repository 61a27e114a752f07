// crates/admin-console/src/storage/memory.rs
// In-process storage backend

use super::ClientStorage;
use crate::Result;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Process-local storage. State lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage, e.g. to simulate state left by a previous run
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

        storage.set_item("token", "def").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("def"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("token").unwrap();
        assert_eq!(storage.get_item("token"), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("username").is_ok());
    }

    #[test]
    fn test_with_items() {
        let storage = MemoryStorage::with_items([("token", "t"), ("username", "alice")]);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get_item("username").as_deref(), Some("alice"));
    }
}
