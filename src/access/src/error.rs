//! Error types for the resolution engine

use thiserror::Error;

use crate::types::CollectionKind;

/// Resolution engine errors
///
/// Absent references and malformed bundles are not errors; they expand
/// to empty sets. The variants below all originate in the backing
/// store and propagate to the query caller unmodified, with no retry
/// inside the engine.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A backing collection could not be fetched
    #[error("failed to fetch {collection} collection: {message}")]
    Fetch {
        /// Collection the fetch targeted
        collection: CollectionKind,
        /// Backend-provided failure detail
        message: String,
    },

    /// Store-level failure not tied to a single collection
    #[error("entity store error: {0}")]
    Store(String),
}

impl AccessError {
    /// Build a fetch error for one collection
    pub fn fetch(collection: CollectionKind, message: impl Into<String>) -> Self {
        Self::Fetch {
            collection,
            message: message.into(),
        }
    }
}

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, AccessError>;
