//! Errors at the persistence boundary.
//!
//! The schedule core never fails: malformed input degrades to partial
//! results. Only storage implementations return errors, and
//! [`Workspaces::load`](crate::workspace::Workspaces::load) recovers from
//! them instead of propagating.

/// Failure reading or writing a stored workspace collection.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying file or device error.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not a valid workspace collection.
    #[error("malformed workspace data: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Whether the stored data exists but could not be decoded.
    #[inline]
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}
