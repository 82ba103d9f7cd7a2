//! Error types for store execution.

use thiserror::Error;

/// Errors reported by a [`crate::GraphStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed a statement.
    #[error("Query execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store could not be reached or configured.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A row or parameter value cannot be bound.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl StoreError {
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Execution(Box::new(err))
    }
}
