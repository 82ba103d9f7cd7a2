//! Graph build orchestration.
//!
//! Provisioning (constraints, indexes) runs before any builder. Node
//! builders then run in order, followed by relationship builders, so every
//! relationship can match its endpoints by identity.

use crate::builder::Builder;
use crate::error::BuildError;
use builder_core::{EntityKind, QueryTemplates, SlotValues, TemplateName, WriteCounters};
use graph_store::{GraphStore, QueryParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::info;

/// Uniqueness constraint on a node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub constraint_name: String,
    pub node_type: String,
    pub node_property: String,
}

/// Standard or full-text index on a node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub index_name: String,
    pub node_type: String,
    pub node_property: String,
}

/// Similarity function of a vector index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    #[default]
    Cosine,
    Euclidean,
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMetric::Cosine => write!(f, "cosine"),
            SimilarityMetric::Euclidean => write!(f, "euclidean"),
        }
    }
}

/// Vector-similarity index on a node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorIndex {
    pub index_name: String,
    pub node_type: String,
    pub node_property: String,
    pub vector_size: NonZeroU32,
    #[serde(default)]
    pub similarity_metric: SimilarityMetric,
}

/// Builders to run, grouped by kind.
#[derive(Default)]
pub struct GraphBuildMap {
    pub node_builders: Vec<Box<dyn Builder>>,
    pub rel_builders: Vec<Box<dyn Builder>>,
}

fn expect_kind(builder: &dyn Builder, expected: EntityKind) -> Result<(), BuildError> {
    let actual = builder.config().kind();
    if actual != expected {
        return Err(BuildError::EntityKindMismatch {
            entity: builder.config().type_name().to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Counters of a complete build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub provisioning: WriteCounters,
    pub nodes: WriteCounters,
    pub relationships: WriteCounters,
}

/// Provisions the schema and runs every builder in order.
pub struct GraphBuilder<S> {
    store: S,
    templates: Arc<QueryTemplates>,
    build_map: GraphBuildMap,
    constraints: Vec<Constraint>,
    indexes: Vec<Index>,
    full_text_indexes: Vec<Index>,
    vector_indexes: Vec<VectorIndex>,
}

impl<S: GraphStore> GraphBuilder<S> {
    pub fn new(store: S, templates: Arc<QueryTemplates>, build_map: GraphBuildMap) -> Self {
        Self {
            store,
            templates,
            build_map,
            constraints: Vec::new(),
            indexes: Vec::new(),
            full_text_indexes: Vec::new(),
            vector_indexes: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<Index>) -> Self {
        self.indexes = indexes;
        self
    }

    pub fn with_full_text_indexes(mut self, indexes: Vec<Index>) -> Self {
        self.full_text_indexes = indexes;
        self
    }

    pub fn with_vector_indexes(mut self, indexes: Vec<VectorIndex>) -> Self {
        self.vector_indexes = indexes;
        self
    }

    /// Render every provisioning statement, constraints first.
    pub fn provisioning_queries(&self) -> Result<Vec<String>, BuildError> {
        let mut queries = Vec::new();

        for c in &self.constraints {
            let values = SlotValues::from([
                ("constraint_name", c.constraint_name.clone()),
                ("node_type", c.node_type.clone()),
                ("node_property", c.node_property.clone()),
            ]);
            queries.push(self.templates.render(TemplateName::Constraint, &values)?);
        }

        let plain = self.indexes.iter().map(|i| (TemplateName::Index, i));
        let full_text = self
            .full_text_indexes
            .iter()
            .map(|i| (TemplateName::FullTextIndex, i));
        for (template, i) in plain.chain(full_text) {
            let values = SlotValues::from([
                ("index_name", i.index_name.clone()),
                ("node_type", i.node_type.clone()),
                ("node_property", i.node_property.clone()),
            ]);
            queries.push(self.templates.render(template, &values)?);
        }

        for vi in &self.vector_indexes {
            let values = SlotValues::from([
                ("index_name", vi.index_name.clone()),
                ("node_type", vi.node_type.clone()),
                ("node_property", vi.node_property.clone()),
                ("vector_size", vi.vector_size.to_string()),
                ("similarity_metric", vi.similarity_metric.to_string()),
            ]);
            queries.push(self.templates.render(TemplateName::VectorIndex, &values)?);
        }

        Ok(queries)
    }

    /// Create constraints and indexes, one statement per transaction.
    pub async fn provision(&self) -> Result<WriteCounters, BuildError> {
        let queries = self.provisioning_queries()?;
        info!("Provisioning {} constraints and indexes", queries.len());

        let params = QueryParams::new();
        let mut counters = WriteCounters::default();
        for query in &queries {
            info!("Provisioning: {}", query.trim_end());
            counters += self.store.execute(query, None, &params).await?;
        }
        Ok(counters)
    }

    /// Run all node builders, then all relationship builders.
    ///
    /// Stops at the first failing builder.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        info!("Building graph nodes");
        for builder in &self.build_map.node_builders {
            expect_kind(builder.as_ref(), EntityKind::Node)?;
            report.nodes += builder.create().await?;
        }

        info!("Building graph relations");
        for builder in &self.build_map.rel_builders {
            expect_kind(builder.as_ref(), EntityKind::Relationship)?;
            report.relationships += builder.create().await?;
        }

        Ok(report)
    }

    /// Provision, then build.
    pub async fn run(&self) -> Result<BuildReport, BuildError> {
        let provisioning = self.provision().await?;
        let report = self.build().await?;
        Ok(BuildReport {
            provisioning,
            ..report
        })
    }
}
