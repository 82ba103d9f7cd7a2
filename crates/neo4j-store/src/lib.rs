//! Neo4j graph store for neo-builder.
//!
//! This crate implements [`graph_store::GraphStore`] on top of the `neo4rs`
//! Bolt driver. Each `execute` call runs in its own explicit transaction;
//! the row batch is bound as the `$rows` list parameter.
//!
//! # Example
//!
//! ```ignore
//! use neo4j_store::{Neo4jOpts, Neo4jStore};
//!
//! let store = Neo4jStore::connect(&Neo4jOpts {
//!     uri: "bolt://localhost:7687".to_string(),
//!     username: "neo4j".to_string(),
//!     password: "password".to_string(),
//!     database: None,
//!     max_connections: 128,
//! })?;
//! ```

mod bolt;
mod store;

pub use bolt::{json_to_bolt, row_to_bolt};
pub use store::{Neo4jOpts, Neo4jStore, DEFAULT_MAX_CONNECTIONS};
