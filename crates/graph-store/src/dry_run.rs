//! Store that logs statements instead of executing them.

use crate::error::StoreError;
use crate::traits::{GraphStore, QueryParams};
use builder_core::{FlatRow, WriteCounters};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// A [`GraphStore`] that only logs what would be executed.
///
/// Every call reports zero counters.
#[derive(Debug, Default)]
pub struct DryRunStore {
    statements: AtomicUsize,
    rows: AtomicUsize,
}

impl DryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements seen so far.
    pub fn statements(&self) -> usize {
        self.statements.load(Ordering::Relaxed)
    }

    /// Number of bound rows seen so far.
    pub fn rows(&self) -> usize {
        self.rows.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl GraphStore for DryRunStore {
    async fn execute(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
        _params: &QueryParams,
    ) -> Result<WriteCounters, StoreError> {
        let row_count = rows.map_or(0, <[FlatRow]>::len);
        self.statements.fetch_add(1, Ordering::Relaxed);
        self.rows.fetch_add(row_count, Ordering::Relaxed);
        info!("Dry run: would execute with {row_count} rows:\n{query}");
        Ok(WriteCounters::default())
    }
}
