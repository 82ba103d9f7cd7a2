//! GraphStore trait definition.

use crate::error::StoreError;
use builder_core::{FlatRow, WriteCounters};
use serde_json::Value;
use std::collections::HashMap;

/// Extra named parameters bound alongside the row batch.
pub type QueryParams = HashMap<String, Value>;

/// Trait for executing statements against a graph store.
///
/// Every call is one atomic transaction. When `rows` is given it is bound
/// as the `$rows` parameter (zero, one or many rows); `None` means the
/// statement carries its own input, e.g. a `LOAD CSV` of a bulk file.
///
/// Write statements issued by the builders return no records, so
/// implementations report the transaction's counters only.
///
/// # Usage Pattern
///
/// ```ignore
/// async fn write<S: GraphStore>(store: &S, query: &str, rows: &[FlatRow]) -> Result<()> {
///     let counters = store.execute(query, Some(rows), &QueryParams::new()).await?;
///     tracing::info!("{counters}");
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute `query` in a single transaction and report its counters.
    async fn execute(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
        params: &QueryParams,
    ) -> Result<WriteCounters, StoreError>;
}

#[async_trait::async_trait]
impl<S: GraphStore + ?Sized> GraphStore for &S {
    async fn execute(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
        params: &QueryParams,
    ) -> Result<WriteCounters, StoreError> {
        (**self).execute(query, rows, params).await
    }
}

#[async_trait::async_trait]
impl<S: GraphStore + ?Sized> GraphStore for std::sync::Arc<S> {
    async fn execute(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
        params: &QueryParams,
    ) -> Result<WriteCounters, StoreError> {
        (**self).execute(query, rows, params).await
    }
}
