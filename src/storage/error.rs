//! Error types for record store operations.

use std::path::PathBuf;

/// Errors returned by [`RecordStore`](crate::storage::RecordStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("record {0} not found")]
    NotFound(i64),
    /// Storage path exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Storage content is not a JSON array of records.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Collection could not be written back to the storage path.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Collection could not be encoded.
    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Largest stored id is already `i64::MAX`.
    #[error("no record id left after {0}")]
    IdsExhausted(i64),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
