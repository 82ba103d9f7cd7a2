//! Neo4j graph store.

use crate::bolt::{json_to_bolt, row_to_bolt};
use builder_core::{FlatRow, WriteCounters};
use graph_store::{GraphStore, QueryParams, StoreError};
use neo4rs::{query, ConfigBuilder, Graph};
use tracing::{debug, warn};

/// Default size of the driver's connection pool.
pub const DEFAULT_MAX_CONNECTIONS: usize = 128;

/// Neo4j connection options (library type without clap).
#[derive(Clone, Debug)]
pub struct Neo4jOpts {
    pub uri: String,
    pub username: String,
    pub password: String,
    /// Target database; the server default when `None`
    pub database: Option<String>,
    pub max_connections: usize,
}

/// [`GraphStore`] backed by a pooled `neo4rs` connection.
///
/// Session pooling is left to the driver; this type adds one explicit
/// transaction per `execute` call.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to Neo4j.
    pub fn connect(opts: &Neo4jOpts) -> Result<Self, StoreError> {
        debug!("Connecting to Neo4j at `{}`", opts.uri);

        let mut builder = ConfigBuilder::default()
            .uri(&opts.uri)
            .user(&opts.username)
            .password(&opts.password)
            .max_connections(opts.max_connections);
        if let Some(database) = &opts.database {
            builder = builder.db(database.as_str());
        }
        let config = builder
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(config).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { graph })
    }
}

#[async_trait::async_trait]
impl GraphStore for Neo4jStore {
    async fn execute(
        &self,
        cypher: &str,
        rows: Option<&[FlatRow]>,
        params: &QueryParams,
    ) -> Result<WriteCounters, StoreError> {
        let mut q = query(cypher);
        if let Some(rows) = rows {
            let batch = rows
                .iter()
                .map(row_to_bolt)
                .collect::<Result<Vec<_>, _>>()?;
            q = q.param("rows", batch);
        }
        for (name, value) in params {
            q = q.param(name, json_to_bolt(name, value)?);
        }

        debug!("Neo4j query:\n{}", cypher);

        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(StoreError::execution)?;

        let summary = match txn.run(q).await {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback after failed query also failed: {rollback_err}");
                }
                return Err(StoreError::execution(e));
            }
        };
        txn.commit().await.map_err(StoreError::execution)?;

        let stats = summary.stats();
        Ok(WriteCounters {
            nodes_created: stats.nodes_created,
            nodes_deleted: stats.nodes_deleted,
            relationships_created: stats.relationships_created,
            relationships_deleted: stats.relationships_deleted,
            properties_set: stats.properties_set,
            labels_added: stats.labels_added,
            indexes_added: stats.indexes_added,
            constraints_added: stats.constraints_added,
        })
    }
}
