//! Store implementation
//!
//! Resolves domains by name and forwards typed operations to them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{KvError, Result};
use crate::protocol::Command;
use super::Domain;

/// Top-level collection of domains
///
/// Constructed once and shared (`Arc<Store>`) by every session.
#[derive(Debug, Default)]
pub struct Store {
    /// Domain name -> domain, guarded against concurrent create/lookup
    domains: RwLock<HashMap<String, Arc<Domain>>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command
    ///
    /// Routes commands to the matching operation. The returned string is the
    /// single `value` reported back to the client, if the operation has one.
    pub fn execute(&self, command: Command) -> Result<Option<String>> {
        match command {
            Command::CreateDomain { domain } => {
                self.create_domain(&domain);
                Ok(None)
            }
            Command::SetString { domain, key, value } => {
                self.set_string(&domain, &key, &value)?;
                Ok(None)
            }
            Command::GetString { domain, key } => self.get_string(&domain, &key).map(Some),
            Command::Increment { domain, key } => {
                self.increment(&domain, &key).map(|v| Some(v.to_string()))
            }
            Command::Decrement { domain, key } => {
                self.decrement(&domain, &key).map(|v| Some(v.to_string()))
            }
            Command::InsertIndex { domain, index, key, value } => {
                self.insert_to_index(&domain, &index, &key, &value)?;
                Ok(None)
            }
            Command::DeleteIndex { domain, index, key } => {
                self.delete_from_index(&domain, &index, &key)?;
                Ok(None)
            }
            Command::DeleteRangeIndex { domain, index, min_key, max_key } => self
                .delete_range_from_index(&domain, &index, &min_key, &max_key)
                .map(|n| Some(n.to_string())),
            Command::SearchIndex { domain, index, key } => {
                self.search_in_index(&domain, &index, &key).map(Some)
            }
            Command::RankIndex { domain, index, key } => {
                self.rank_in_index(&domain, &index, &key).map(Some)
            }
        }
    }

    // =========================================================================
    // Domains
    // =========================================================================

    /// Create an empty domain, replacing any existing one with the same name
    pub fn create_domain(&self, name: &str) {
        let replaced = self
            .domains
            .write()
            .insert(name.to_string(), Arc::new(Domain::new()))
            .is_some();

        if replaced {
            tracing::debug!("Domain {:?} recreated, previous contents dropped", name);
        } else {
            tracing::debug!("Domain {:?} created", name);
        }
    }

    /// Resolve a domain by name
    ///
    /// The map lock is released before the caller touches the domain.
    pub fn domain(&self, name: &str) -> Result<Arc<Domain>> {
        self.domains
            .read()
            .get(name)
            .cloned()
            .ok_or(KvError::DomainNotFound)
    }

    /// Number of domains
    pub fn domain_count(&self) -> usize {
        self.domains.read().len()
    }

    // =========================================================================
    // String operations
    // =========================================================================

    pub fn set_string(&self, domain: &str, key: &str, value: &str) -> Result<()> {
        self.domain(domain)?.set_string(key, value);
        Ok(())
    }

    pub fn get_string(&self, domain: &str, key: &str) -> Result<String> {
        self.domain(domain)?.get_string(key)
    }

    /// Increment an integer string, returning the new value
    pub fn increment(&self, domain: &str, key: &str) -> Result<i64> {
        self.domain(domain)?.add_to_integer(key, 1)
    }

    /// Decrement an integer string, returning the new value
    pub fn decrement(&self, domain: &str, key: &str) -> Result<i64> {
        self.domain(domain)?.add_to_integer(key, -1)
    }

    // =========================================================================
    // Index operations
    // =========================================================================

    /// Insert into a domain's index, creating the index if needed
    pub fn insert_to_index(&self, domain: &str, index: &str, key: &str, value: &str) -> Result<()> {
        let key = parse_key(key, "key")?;
        self.domain(domain)?.index_insert(index, key, value);
        Ok(())
    }

    /// Delete a key from an existing index; absent keys are not an error
    pub fn delete_from_index(&self, domain: &str, index: &str, key: &str) -> Result<()> {
        let key = parse_key(key, "key")?;
        self.domain(domain)?.index_delete(index, key)?;
        Ok(())
    }

    /// Delete `min_key..=max_key` from an existing index, returning the count removed
    pub fn delete_range_from_index(
        &self,
        domain: &str,
        index: &str,
        min_key: &str,
        max_key: &str,
    ) -> Result<usize> {
        let start = parse_key(min_key, "minKey")?;
        let end = parse_key(max_key, "maxKey")?;
        self.domain(domain)?.index_delete_range(index, start, end)
    }

    pub fn search_in_index(&self, domain: &str, index: &str, key: &str) -> Result<String> {
        let key = parse_key(key, "key")?;
        self.domain(domain)?.index_search(index, key)
    }

    /// Rank of `key` in an index, as a decimal string
    pub fn rank_in_index(&self, domain: &str, index: &str, key: &str) -> Result<String> {
        let key = parse_key(key, "key")?;
        let rank = self.domain(domain)?.index_rank(index, key)?;
        Ok(rank.to_string())
    }
}

/// Parse a base-10 index key
fn parse_key(raw: &str, field: &'static str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| KvError::InvalidKey(field))
}
