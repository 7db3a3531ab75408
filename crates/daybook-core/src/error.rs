//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable signals returned by the event store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No event in the index has the requested title.
    #[error("Event not found: {title}")]
    NotFound { title: String },

    /// The requested bucket (or the whole index) does not exist.
    #[error("No events available")]
    Empty,
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }

    /// Returns true for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
