//! # Persistence port
//!
//! The document store never talks to a concrete storage API. It goes through
//! [`KeyValueStore`], a string key/value contract shaped after the browser's
//! `localStorage`:
//!
//! - `get` returns the last value written for a key, or `None` if it was
//!   never written (or was removed).
//! - `set` and `remove` are best effort. A failure only means "did not
//!   persist"; callers log it and carry on.
//!
//! There is no transaction across keys. A crash between two writes can leave
//! the keys inconsistent with each other, which the store tolerates on the
//! next load.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

/// Why a backend could not serve a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The backend is not reachable at all (e.g. storage disabled by the user).
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded writing `{key}` ({needed} bytes)")]
    QuotaExceeded { key: String, needed: usize },

    /// Any other backend-reported failure, carried as text.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable, origin-scoped string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
