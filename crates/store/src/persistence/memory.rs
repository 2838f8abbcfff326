//! In-process storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::PersistenceBridge;
use crate::error::StorageError;

/// Key-value storage held in memory.
///
/// Clones share the same map, so a test can hand one handle to a store and
/// inspect the mirror through another. Stores are single-threaded, hence
/// `Rc<RefCell<_>>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PersistenceBridge for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let mut writer = MemoryStorage::new();
        let reader = writer.clone();

        writer.write("cartItems", "[]").unwrap();
        assert_eq!(reader.read("cartItems").unwrap().as_deref(), Some("[]"));
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut storage = MemoryStorage::new();
        storage.remove("nothing").unwrap();
        assert!(storage.is_empty());
    }
}
