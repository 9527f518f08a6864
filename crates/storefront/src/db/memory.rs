//! In-memory repository.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{RepositoryError, StateRepository, StorageKey};

/// Repository backed by a process-local map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateRepository for MemoryRepository {
    fn get(&self, key: StorageKey) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries().get(&key).cloned())
    }

    fn put(&self, key: StorageKey, value: &str) -> Result<(), RepositoryError> {
        self.entries().insert(key, value.to_owned());
        Ok(())
    }

    fn delete(&self, key: StorageKey) -> Result<(), RepositoryError> {
        self.entries().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites() {
        let repo = MemoryRepository::new();
        repo.put(StorageKey::Cart, "[]").unwrap();
        repo.put(StorageKey::Cart, "[1]").unwrap();
        assert_eq!(repo.get(StorageKey::Cart).unwrap().as_deref(), Some("[1]"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_missing_key_succeeds() {
        let repo = MemoryRepository::new();
        repo.delete(StorageKey::GuestUser).unwrap();
        assert!(repo.is_empty());
        assert_eq!(repo.get(StorageKey::GuestUser).unwrap(), None);
    }
}
