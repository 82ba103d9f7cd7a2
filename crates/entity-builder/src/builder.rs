//! Entity builder: rows in, counters out.

use crate::error::BuildError;
use crate::producer::RowProducer;
use builder_core::{
    dedup_rows, BuilderConfig, Deduplicated, EntityKind, ExecutionMode, FlatRow, QueryAssembler,
    QueryTemplates, Row, SchemaValidator, WriteCounters,
};
use bulk_file::BulkFileWriter;
use graph_store::{GraphStore, TransactionRunner};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Object-safe view of a builder, used by the orchestrator.
#[async_trait::async_trait]
pub trait Builder: Send + Sync {
    fn config(&self) -> &BuilderConfig;

    /// Create the builder's nodes or relationships, whichever it is configured for.
    async fn create(&self) -> Result<WriteCounters, BuildError>;
}

/// Rows and query ready for execution.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    /// Head clause followed by the create/merge body
    pub query: String,
    /// Row batch to bind; `None` when the query reads the bulk file
    pub rows: Option<Vec<FlatRow>>,
    /// Number of deduplicated rows
    pub row_count: usize,
}

/// Builds one node label or relationship type from a set of source items.
///
/// The builder is long-lived; every invocation regenerates its rows from
/// the items and keeps no state between calls.
pub struct EntityBuilder<I, P, S> {
    store: S,
    config: BuilderConfig,
    templates: Arc<QueryTemplates>,
    producer: P,
    items: Arc<[I]>,
    bulk_writer: BulkFileWriter,
}

impl<I, P, S> EntityBuilder<I, P, S>
where
    I: Send + Sync,
    P: RowProducer<I>,
    S: GraphStore,
{
    pub fn new(
        store: S,
        config: BuilderConfig,
        templates: Arc<QueryTemplates>,
        producer: P,
        items: impl Into<Arc<[I]>>,
    ) -> Self {
        Self {
            store,
            config,
            templates,
            producer,
            items: items.into(),
            bulk_writer: BulkFileWriter::new(),
        }
    }

    pub fn with_bulk_writer(mut self, bulk_writer: BulkFileWriter) -> Self {
        self.bulk_writer = bulk_writer;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Run the producer over every item and materialize the rows.
    ///
    /// Returns `None` when no rows are produced. The first row's property
    /// keys are checked against the declared casts before the rest of the
    /// sequence is drawn.
    pub fn generate_rows(&self) -> Result<Option<Vec<Row>>, BuildError> {
        info!("Generating {} rows", self.config.type_name());

        let mut rows = self
            .items
            .iter()
            .flat_map(|item| self.producer.rows(item));

        let Some(first) = rows.next() else {
            return Ok(None);
        };
        SchemaValidator::new(&self.config).check(&first)?;

        let mut batch = vec![first];
        batch.extend(rows);
        Ok(Some(batch))
    }

    /// Generate, validate and deduplicate rows, assemble the query and, in
    /// bulk-file mode, write the bulk file.
    pub fn prepare(&self) -> Result<Option<PreparedBatch>, BuildError> {
        let Some(rows) = self.generate_rows()? else {
            return Ok(None);
        };

        let Deduplicated { rows, discarded } = dedup_rows(rows);
        if discarded > 0 {
            warn!(
                "Discarded {} duplicate {} rows, first occurrences kept",
                discarded,
                self.config.type_name()
            );
        }

        let query = self.render_query()?;
        let row_count = rows.len();
        let rows = match self.config.mode {
            ExecutionMode::BulkFileCreate => {
                self.bulk_writer.write_for(&self.config, &rows)?;
                None
            }
            ExecutionMode::TransactionalUpsert => Some(
                rows.iter()
                    .map(|row| row.flatten(&self.config.id_property))
                    .collect(),
            ),
        };

        Ok(Some(PreparedBatch {
            query,
            rows,
            row_count,
        }))
    }

    /// The creation query this builder executes.
    pub fn render_query(&self) -> Result<String, BuildError> {
        Ok(QueryAssembler::new(&self.templates, &self.config).assemble()?)
    }

    /// Create nodes. Fails on a relationship builder.
    pub async fn create_nodes(&self) -> Result<WriteCounters, BuildError> {
        self.create_checked(EntityKind::Node).await
    }

    /// Create relationships. Fails on a node builder.
    pub async fn create_rels(&self) -> Result<WriteCounters, BuildError> {
        self.create_checked(EntityKind::Relationship).await
    }

    async fn create_checked(&self, expected: EntityKind) -> Result<WriteCounters, BuildError> {
        let actual = self.config.kind();
        if actual != expected {
            return Err(BuildError::EntityKindMismatch {
                entity: self.config.type_name().to_string(),
                expected,
                actual,
            });
        }

        let Some(batch) = self.prepare()? else {
            info!(
                "No {} rows generated, nothing to write",
                self.config.type_name()
            );
            return Ok(WriteCounters::default());
        };

        debug!(
            "Executing {} query over {} rows",
            self.config.type_name(),
            batch.row_count
        );
        let runner = TransactionRunner::new(&self.store, self.config.transaction_size);
        let counters = runner.run(&batch.query, batch.rows.as_deref()).await?;

        info!("{} {}: {}", actual, self.config.type_name(), counters);
        Ok(counters)
    }
}

#[async_trait::async_trait]
impl<I, P, S> Builder for EntityBuilder<I, P, S>
where
    I: Send + Sync,
    P: RowProducer<I>,
    S: GraphStore,
{
    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    async fn create(&self) -> Result<WriteCounters, BuildError> {
        self.create_checked(self.config.kind()).await
    }
}
