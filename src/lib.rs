//! neo-builder library
//!
//! Builds Neo4j graphs from batches of source items. Every node label and
//! relationship type has its own entity builder; a graph is a set of
//! builders plus the constraints and indexes it needs.
//!
//! # Crates
//!
//! - `builder_core` - rows, casts, configuration, validation, query templates
//! - `graph_store` - the store seam and the chunking transaction runner
//! - `neo4j_store` - the `neo4rs`-backed store
//! - `bulk_file` - CSV hand-off for `LOAD CSV` builds
//! - `entity_builder` - entity builders and the graph build orchestrator
//!
//! # CLI Usage
//!
//! ```bash
//! # Upsert the ml-small graph in transactions of 5000 rows
//! neo-builder build --items ml-latest-small/movies.csv --transaction-size 5000
//!
//! # Create it from bulk files instead
//! neo-builder build --items ml-latest-small/movies.csv --bulk-file \
//!   --import-dir /var/lib/neo4j/import
//!
//! # Inspect the query a builder would run
//! neo-builder render --entity movie-genre --bulk-file
//! ```

use builder_core::BuilderConfig;
use clap::Args;
use neo4j_store::{Neo4jOpts, DEFAULT_MAX_CONNECTIONS};
use std::path::PathBuf;

pub mod graphs;

/// Neo4j connection arguments.
#[derive(Args, Clone, Debug)]
pub struct Neo4jArgs {
    /// Neo4j connection string (e.g., bolt://localhost:7687)
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, env = "NEO4J_USERNAME", default_value = "neo4j")]
    pub neo4j_username: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "password")]
    pub neo4j_password: String,

    /// Neo4j database name (server default when omitted)
    #[arg(long, env = "NEO4J_DATABASE")]
    pub neo4j_database: Option<String>,

    /// Size of the driver's connection pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub neo4j_max_connections: usize,
}

impl From<&Neo4jArgs> for Neo4jOpts {
    fn from(args: &Neo4jArgs) -> Self {
        Self {
            uri: args.neo4j_uri.clone(),
            username: args.neo4j_username.clone(),
            password: args.neo4j_password.clone(),
            database: args.neo4j_database.clone(),
            max_connections: args.neo4j_max_connections,
        }
    }
}

/// Overrides applied to every builder of a graph.
#[derive(Args, Clone, Debug, Default)]
pub struct BuildOptions {
    /// Create entities from bulk files with `LOAD CSV` instead of upserting
    #[arg(long)]
    pub bulk_file: bool,

    /// Directory bulk files are written to; must be the store's import directory
    #[arg(long)]
    pub import_dir: Option<PathBuf>,

    /// Maximum number of rows per transaction
    #[arg(long)]
    pub transaction_size: Option<usize>,
}

impl BuildOptions {
    pub fn apply(&self, config: BuilderConfig) -> BuilderConfig {
        let mut config = config.with_bulk_file(self.bulk_file);
        if let Some(dir) = &self.import_dir {
            config = config.with_import_dir(dir.clone());
        }
        if let Some(size) = self.transaction_size {
            config = config.with_transaction_size(size);
        }
        config
    }
}
