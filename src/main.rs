//! Command-line interface for neo-builder
//!
//! # Usage Examples
//!
//! ## Build
//! ```bash
//! # Upsert the ml-small graph into a local Neo4j
//! neo-builder build --items ml-latest-small/movies.csv \
//!   --neo4j-uri bolt://localhost:7687 --neo4j-password secret
//!
//! # Bulk-file create, without touching constraints or indexes
//! neo-builder build --items ml-latest-small/movies.csv \
//!   --bulk-file --import-dir /var/lib/neo4j/import --skip-provision
//!
//! # Log every statement instead of executing it
//! neo-builder build --items ml-latest-small/movies.csv --dry-run
//! ```
//!
//! ## Render
//! ```bash
//! neo-builder render --entity genre
//! neo-builder render --entity movie-genre --bulk-file
//! ```

use anyhow::Context;
use builder_core::{BuilderConfig, QueryAssembler, QueryTemplates};
use clap::{Parser, Subcommand, ValueEnum};
use entity_builder::BuildReport;
use graph_store::{DryRunStore, GraphStore};
use neo4j_store::{Neo4jOpts, Neo4jStore};
use neo_builder::graphs::ml_small::{self, GenreNodes, MovieGenreRels, MovieNodes};
use neo_builder::{BuildOptions, Neo4jArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "neo-builder")]
#[command(about = "A tool for building Neo4j graphs from batches of source items")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the ml-small graph from a MovieLens movies.csv file
    Build {
        /// Path to movies.csv
        #[arg(long, value_name = "PATH")]
        items: PathBuf,

        #[command(flatten)]
        options: BuildOptions,

        /// YAML file overriding the built-in query templates
        #[arg(long, value_name = "PATH")]
        templates: Option<PathBuf>,

        /// Log statements instead of executing them
        #[arg(long)]
        dry_run: bool,

        /// Do not create constraints and indexes
        #[arg(long)]
        skip_provision: bool,

        #[command(flatten)]
        neo4j: Neo4jArgs,
    },

    /// Print the creation query of one ml-small entity
    Render {
        #[arg(long, value_enum)]
        entity: Entity,

        /// Render the bulk-file variant
        #[arg(long)]
        bulk_file: bool,

        /// YAML file overriding the built-in query templates
        #[arg(long, value_name = "PATH")]
        templates: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Entity {
    Movie,
    Genre,
    MovieGenre,
}

impl Entity {
    fn config(self) -> BuilderConfig {
        match self {
            Entity::Movie => MovieNodes::config(),
            Entity::Genre => GenreNodes::config(),
            Entity::MovieGenre => MovieGenreRels::config(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            items,
            options,
            templates,
            dry_run,
            skip_provision,
            neo4j,
        } => {
            let templates = load_templates(templates.as_deref())?;
            let items: Arc<[ml_small::MovieItem]> = ml_small::load_items(&items)?.into();

            let report = if dry_run {
                info!("Dry run: statements are logged, not executed");
                let store: Arc<dyn GraphStore> = Arc::new(DryRunStore::new());
                build(store, templates, items, &options, skip_provision).await?
            } else {
                let opts = Neo4jOpts::from(&neo4j);
                let store = Neo4jStore::connect(&opts)
                    .with_context(|| format!("Failed to connect to Neo4j at {}", opts.uri))?;
                build(store, templates, items, &options, skip_provision).await?
            };

            info!("Provisioning: {}", report.provisioning);
            info!("Nodes: {}", report.nodes);
            info!("Relationships: {}", report.relationships);
        }
        Commands::Render {
            entity,
            bulk_file,
            templates,
        } => {
            let templates = load_templates(templates.as_deref())?;
            let config = entity.config().with_bulk_file(bulk_file);
            let query = QueryAssembler::new(&templates, &config).assemble()?;
            println!("{query}");
        }
    }

    Ok(())
}

fn load_templates(path: Option<&Path>) -> anyhow::Result<Arc<QueryTemplates>> {
    let templates = match path {
        Some(path) => QueryTemplates::from_file(path)
            .with_context(|| format!("Failed to load query templates from {}", path.display()))?,
        None => QueryTemplates::embedded()?,
    };
    Ok(Arc::new(templates))
}

async fn build<S>(
    store: S,
    templates: Arc<QueryTemplates>,
    items: Arc<[ml_small::MovieItem]>,
    options: &BuildOptions,
    skip_provision: bool,
) -> anyhow::Result<BuildReport>
where
    S: GraphStore + Clone + 'static,
{
    let graph = ml_small::graph_builder(store, templates, items, options);
    let report = if skip_provision {
        graph.build().await?
    } else {
        graph.run().await?
    };
    Ok(report)
}
