use std::collections::HashMap;

use super::{KeyValueStore, PersistenceError};

/// In-memory [`KeyValueStore`].
///
/// Used by tests, and by the frontend when the browser refuses access to
/// `localStorage`. An optional quota (counted as the sum of key and value
/// lengths in bytes) makes writes fail the way a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects any write pushing its size past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Pre-populate a key, bypassing the quota. Handy for seeding fixtures.
    pub fn seeded(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Toggle a simulated outage: every call fails with `Unavailable`.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_online(&self) -> Result<(), PersistenceError> {
        if self.offline {
            Err(PersistenceError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.check_online()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check_online()?;
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_bytes_without(key));
            if needed > available {
                return Err(PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.check_online()?;
        self.entries.remove(key);
        Ok(())
    }
}
