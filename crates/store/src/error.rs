//! Store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this id already exists in the collection.
    #[error("document {id} already exists in '{collection}'")]
    Duplicate {
        /// Collection name.
        collection: &'static str,
        /// Document id.
        id: Uuid,
    },

    /// No document with this id exists in the collection.
    #[error("document {id} not found in '{collection}'")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// Document id.
        id: Uuid,
    },

    /// The configured store URL names a driver this build does not bundle.
    #[error("unsupported store driver: {0}")]
    UnsupportedDriver(String),

    /// A document failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
