//! Error types for entity builders.

use builder_core::{CoreError, EntityKind};
use bulk_file::BulkFileError;
use graph_store::StoreError;
use thiserror::Error;

/// Errors that abort a builder invocation.
///
/// Lower-level errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    BulkFile(#[from] BulkFileError),

    /// A node operation was called on a relationship builder or vice versa.
    #[error("Builder for '{entity}' creates {actual}s, not {expected}s")]
    EntityKindMismatch {
        entity: String,
        expected: EntityKind,
        actual: EntityKind,
    },
}
