//! Centralized error types for graphcat.

use thiserror::Error;

/// Main error type for catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A write produced no result, e.g. the parent node was missing.
    #[error("Failed to create {0}")]
    CreationFailed(String),

    /// A read produced no result.
    #[error("Failed to get {0}")]
    NotFound(String),

    /// A delete query unexpectedly produced a result.
    #[error("Failed to delete {0}")]
    DeletionFailed(String),

    #[error("Error retrieving warehouse metadata: {0}")]
    MetadataExtractionFailed(String),

    #[error("Error persisting metadata for {entity}: {message}")]
    SynchronizationFailed { entity: String, message: String },

    #[error("Graph query failed: {0}")]
    GraphUnavailable(String),

    #[error("Warehouse request failed: {0}")]
    WarehouseUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Create a not-found error for an entity kind.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a sync failure pinned to the entity that was being upserted.
    pub fn sync_failed(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SynchronizationFailed {
            entity: entity.into(),
            message: message.into(),
        }
    }
}
