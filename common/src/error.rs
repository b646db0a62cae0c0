use thiserror::Error;

use crate::storage::PersistenceError;

/// Failures raised by the document store.
///
/// Only `Validation` and `FileRead` ever reach a caller. The persistence
/// variants are built at the operation boundary so they can be logged, then
/// dropped: the in-memory state stays authoritative for the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// User input failed a precondition. Nothing was changed.
    #[error("{field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// An uploaded file could not be turned into an image.
    #[error("could not read image file: {0}")]
    FileRead(String),

    /// A stored entry was unreadable or malformed at load time.
    #[error("stored entry `{key}` is unreadable: {reason}")]
    PersistenceRead { key: String, reason: String },

    /// A write to the persistence backend failed.
    #[error("could not persist `{key}`: {source}")]
    PersistenceWrite {
        key: String,
        #[source]
        source: PersistenceError,
    },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn blank(field: &'static str) -> Self {
        StoreError::Validation {
            field,
            reason: "must not be empty",
        }
    }
}
