//! Core types for the neo-builder graph ingestion framework.
//!
//! This crate provides the building blocks every entity builder is made of:
//!
//! - [`Row`] - One node or relationship to write, with its [`Identity`]
//! - [`PropertyCastMap`] - Ordered property names with optional coercion functions
//! - [`BuilderConfig`] - Immutable per-builder configuration
//! - [`SchemaValidator`] - Checks generated rows against the declared properties
//! - [`dedup_rows`] - First-occurrence-wins deduplication keyed by identity
//! - [`QueryTemplates`] / [`QueryAssembler`] - Templated Cypher assembly
//! - [`WriteCounters`] - Aggregated write statistics
//!
//! # Architecture
//!
//! ```text
//! builder-core (this crate)
//!    │
//!    ├─── graph-store     (connector trait + transaction runner)
//!    ├─── bulk-file       (CSV hand-off for LOAD CSV)
//!    └─── entity-builder  (row producers, builders, orchestrator)
//! ```

pub mod cast;
pub mod config;
pub mod counters;
pub mod dedup;
pub mod error;
pub mod query;
pub mod row;
pub mod schema;
pub mod template;

pub use cast::{PropertyCast, PropertyCastMap, IDENTITY_CAST};
pub use config::{BuilderConfig, EntityKind, EntityType, ExecutionMode, QueryNames};
pub use counters::WriteCounters;
pub use dedup::{dedup_rows, Deduplicated};
pub use error::{CoreError, Result};
pub use query::{property_fragment, AssignmentStyle, QueryAssembler};
pub use row::{FlatRow, Identity, Properties, Row, SRC_ID_FIELD, TGT_ID_FIELD};
pub use schema::SchemaValidator;
pub use template::{QueryTemplate, QueryTemplates, Segment, SlotValues, TemplateName};
