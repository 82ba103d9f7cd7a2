//! Chunked, sequential transaction execution.

use crate::error::StoreError;
use crate::traits::{GraphStore, QueryParams};
use builder_core::{FlatRow, WriteCounters};
use tracing::{debug, error};

/// Splits a row batch into transactions and executes them in order.
///
/// Chunk N+1 starts only after chunk N has committed. The first failing
/// chunk aborts the run and its error is returned as-is; chunks committed
/// before it stay committed and their counters are not returned.
pub struct TransactionRunner<'a, S: GraphStore + ?Sized> {
    store: &'a S,
    transaction_size: usize,
}

impl<'a, S: GraphStore + ?Sized> TransactionRunner<'a, S> {
    /// Create a runner. A `transaction_size` of zero is treated as one.
    pub fn new(store: &'a S, transaction_size: usize) -> Self {
        Self {
            store,
            transaction_size: transaction_size.max(1),
        }
    }

    pub fn transaction_size(&self) -> usize {
        self.transaction_size
    }

    /// Execute `query` over `rows`.
    ///
    /// With `rows == None` the query carries its own input and runs as a
    /// single transaction.
    pub async fn run(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
    ) -> Result<WriteCounters, StoreError> {
        let params = QueryParams::new();

        let Some(rows) = rows else {
            debug!("Executing statement without row batch");
            return self.store.execute(query, None, &params).await;
        };

        let total = rows.len().div_ceil(self.transaction_size);
        let mut counters = WriteCounters::default();

        for (index, chunk) in rows.chunks(self.transaction_size).enumerate() {
            debug!(
                "Transaction {}/{}: {} rows",
                index + 1,
                total,
                chunk.len()
            );
            match self.store.execute(query, Some(chunk), &params).await {
                Ok(chunk_counters) => {
                    debug!("Transaction {}/{} committed: {}", index + 1, total, chunk_counters);
                    counters += chunk_counters;
                }
                Err(e) => {
                    error!(
                        "Transaction {}/{} failed, aborting remaining {} transactions: {}",
                        index + 1,
                        total,
                        total - index - 1,
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records chunk sizes and fails on a chosen call.
    #[derive(Default)]
    struct RecordingStore {
        chunks: Mutex<Vec<Option<usize>>>,
        fail_on_call: Option<usize>,
    }

    #[async_trait::async_trait]
    impl GraphStore for RecordingStore {
        async fn execute(
            &self,
            _query: &str,
            rows: Option<&[FlatRow]>,
            _params: &QueryParams,
        ) -> Result<WriteCounters, StoreError> {
            let mut chunks = self.chunks.lock().unwrap();
            let call = chunks.len();
            chunks.push(rows.map(<[FlatRow]>::len));
            if self.fail_on_call == Some(call) {
                return Err(StoreError::Connection("store went away".to_string()));
            }
            let created = rows.map_or(1, |rows| rows.len()) as u64;
            Ok(WriteCounters {
                nodes_created: created,
                properties_set: created * 2,
                ..Default::default()
            })
        }
    }

    fn rows(n: usize) -> Vec<FlatRow> {
        (0..n)
            .map(|i| FlatRow::from([("node_id".to_string(), json!(i.to_string()))]))
            .collect()
    }

    #[tokio::test]
    async fn test_chunks_and_sums() {
        let store = RecordingStore::default();
        let runner = TransactionRunner::new(&store, 4);

        let counters = runner.run("q", Some(&rows(10))).await.unwrap();

        assert_eq!(
            *store.chunks.lock().unwrap(),
            vec![Some(4), Some(4), Some(2)]
        );
        assert_eq!(counters.nodes_created, 10);
        assert_eq!(counters.properties_set, 20);
    }

    #[tokio::test]
    async fn test_without_rows_runs_once() {
        let store = RecordingStore::default();
        let runner = TransactionRunner::new(&store, 4);

        let counters = runner.run("q", None).await.unwrap();

        assert_eq!(*store.chunks.lock().unwrap(), vec![None]);
        assert_eq!(counters.nodes_created, 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_chunks() {
        let store = RecordingStore {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let runner = TransactionRunner::new(&store, 3);

        let result = runner.run("q", Some(&rows(9))).await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
        assert_eq!(store.chunks.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_transaction_size() {
        let store = RecordingStore::default();
        let runner = TransactionRunner::new(&store, 0);

        runner.run("q", Some(&rows(2))).await.unwrap();

        assert_eq!(runner.transaction_size(), 1);
        assert_eq!(store.chunks.lock().unwrap().len(), 2);
    }
}
