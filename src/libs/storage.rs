//! Durable key-value storage seam.
//!
//! The journal keeps one serialized value per collection key. Anything that
//! can get and replace a string by key can back it: the SQLite table in
//! [`crate::db::collections`] for the application, [`MemoryStorage`] for tests
//! and throwaway sessions.
//!
//! Both implementations enforce an optional byte quota over the sum of all
//! stored values, the same way a browser's local storage refuses writes once
//! its budget is spent.

use super::error::StorageError;
use std::collections::HashMap;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the whole value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Fails with [`StorageError::QuotaExceeded`] when `others + value_len` does not fit.
pub(crate) fn check_quota(quota: Option<usize>, key: &str, others: usize, value_len: usize) -> Result<(), StorageError> {
    match quota {
        Some(quota) if others + value_len > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            required: value_len,
            quota: quota.saturating_sub(others),
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let others: usize = self.values.iter().filter(|(k, _)| k.as_str() != key).map(|(_, v)| v.len()).sum();
        check_quota(self.quota, key, others, value.len())?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_replaces_values() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("tasks").unwrap(), None);

        storage.set("tasks", "[]").unwrap();
        storage.set("tasks", "[1]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_quota_counts_other_keys_but_not_the_replaced_value() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("a", "12345").unwrap();
        storage.set("a", "12345678901").unwrap_err();
        storage.set("a", "1").unwrap();
        storage.set("b", "123456789").unwrap();

        match storage.set("c", "x") {
            Err(StorageError::QuotaExceeded { key, required, quota }) => {
                assert_eq!(key, "c");
                assert_eq!(required, 1);
                assert_eq!(quota, 0);
            }
            other => panic!("expected quota error, got {:?}", other),
        }
        assert_eq!(storage.raw("c"), None);
    }
}
