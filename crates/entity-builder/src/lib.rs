//! Entity builders and graph build orchestration.
//!
//! An [`EntityBuilder`] turns source items into rows with an injected
//! [`RowProducer`], validates and deduplicates them, assembles the creation
//! query and runs it through a [`graph_store::TransactionRunner`].
//! [`GraphBuilder`] provisions constraints and indexes, then runs all node
//! builders before all relationship builders.

mod builder;
mod error;
mod orchestrator;
mod producer;

pub use builder::{Builder, EntityBuilder, PreparedBatch};
pub use error::BuildError;
pub use orchestrator::{
    BuildReport, Constraint, GraphBuildMap, GraphBuilder, Index, SimilarityMetric, VectorIndex,
};
pub use producer::{from_fn, FnProducer, RowProducer};
