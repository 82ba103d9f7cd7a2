//! Bulk-file materialization.
//!
//! In bulk-file mode a deduplicated batch is written to a CSV file inside
//! the store's import directory, and a single `LOAD CSV` statement creates
//! the entities from it. The file is a transient hand-off artifact.

mod error;
mod writer;

pub use error::BulkFileError;
pub use writer::{column_names, value_to_field, BulkFileWriter, WriteMetrics, DEFAULT_BUFFER_SIZE};
