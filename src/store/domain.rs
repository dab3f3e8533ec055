//! Domain implementation
//!
//! A namespace holding one string map and any number of named skip lists.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{KvError, Result};
use crate::index::SkipList;

/// Data guarded by the domain lock
#[derive(Debug, Default)]
struct DomainData {
    strings: HashMap<String, String>,
    indexes: HashMap<String, SkipList>,
}

/// An isolated namespace of strings and ordered indexes
///
/// Every method takes the lock for exactly its own duration; the guard is
/// dropped on all return paths.
#[derive(Debug, Default)]
pub struct Domain {
    data: RwLock<DomainData>,
}

impl Domain {
    /// Create an empty domain
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // String store
    // =========================================================================

    /// Set a string value, overwriting any previous one (write lock)
    pub fn set_string(&self, key: &str, value: &str) {
        let mut data = self.data.write();
        data.strings.insert(key.to_string(), value.to_string());
    }

    /// Get a string value (read lock)
    pub fn get_string(&self, key: &str) -> Result<String> {
        let data = self.data.read();
        data.strings.get(key).cloned().ok_or(KvError::KeyNotFound)
    }

    /// Add `delta` to an integer stored as a string (write lock)
    ///
    /// A missing key reads as the empty string, which does not parse, so it
    /// fails with `NotAnInteger` rather than `KeyNotFound`.
    pub fn add_to_integer(&self, key: &str, delta: i64) -> Result<i64> {
        let mut data = self.data.write();

        let current = data
            .strings
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
            .parse::<i64>()
            .map_err(|_| KvError::NotAnInteger)?;
        let updated = current.checked_add(delta).ok_or(KvError::NotAnInteger)?;

        data.strings.insert(key.to_string(), updated.to_string());
        Ok(updated)
    }

    // =========================================================================
    // Index store
    // =========================================================================

    /// Insert into the named index, creating it on first use (write lock)
    pub fn index_insert(&self, index: &str, key: i64, value: &str) {
        let mut data = self.data.write();
        data.indexes
            .entry(index.to_string())
            .or_default()
            .insert(key, value);
    }

    /// Delete a key from the named index (write lock)
    ///
    /// Returns whether the key was present.
    pub fn index_delete(&self, index: &str, key: i64) -> Result<bool> {
        let mut data = self.data.write();
        let list = data.indexes.get_mut(index).ok_or(KvError::IndexNotFound)?;
        Ok(list.delete(key).is_some())
    }

    /// Delete all keys in `start..=end` from the named index (write lock)
    pub fn index_delete_range(&self, index: &str, start: i64, end: i64) -> Result<usize> {
        let mut data = self.data.write();
        let list = data.indexes.get_mut(index).ok_or(KvError::IndexNotFound)?;
        Ok(list.delete_range(start, end))
    }

    /// Look up a key in the named index (read lock)
    pub fn index_search(&self, index: &str, key: i64) -> Result<String> {
        let data = self.data.read();
        let list = data.indexes.get(index).ok_or(KvError::IndexNotFound)?;
        list.search(key).map(str::to_string).ok_or(KvError::KeyNotFound)
    }

    /// Count keys strictly below `key` in the named index (read lock)
    pub fn index_rank(&self, index: &str, key: i64) -> Result<usize> {
        let data = self.data.read();
        let list = data.indexes.get(index).ok_or(KvError::IndexNotFound)?;
        Ok(list.rank(key))
    }

    /// Number of keys in the named index (read lock)
    pub fn index_len(&self, index: &str) -> Result<usize> {
        let data = self.data.read();
        let list = data.indexes.get(index).ok_or(KvError::IndexNotFound)?;
        Ok(list.len())
    }
}
