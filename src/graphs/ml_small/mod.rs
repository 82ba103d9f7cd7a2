//! The ml-small graph: MovieLens movies and their genres.
//!
//! Items are read from the `movies.csv` file of the MovieLens small
//! dataset. Each movie becomes a `Movie` node, each of its `|`-separated
//! genres a `Genre` node, and every movie is linked to its genres with a
//! `HAS_GENRE` relationship.

mod nodes;
mod rels;

pub use nodes::{
    genre_node_id, movie_node_id, GenreNodes, MovieNodes, FAKE_VECTOR_SIZE, GENRE_NODE_TYPE,
    MOVIE_NODE_TYPE,
};
pub use rels::{MovieGenreRels, HAS_GENRE_REL_TYPE};

use crate::BuildOptions;
use anyhow::Context;
use builder_core::config::DEFAULT_ID_PROPERTY;
use builder_core::QueryTemplates;
use entity_builder::{
    Constraint, EntityBuilder, GraphBuildMap, GraphBuilder, Index, SimilarityMetric, VectorIndex,
};
use graph_store::GraphStore;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One line of `movies.csv`. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieItem {
    pub title: String,
    pub genres: String,
}

impl MovieItem {
    /// Non-empty genres in file order.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.split('|').filter(|genre| !genre.is_empty())
    }
}

/// Read every movie from a MovieLens `movies.csv` file.
pub fn load_items(path: &Path) -> anyhow::Result<Vec<MovieItem>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open items file {}", path.display()))?;

    let items = reader
        .deserialize()
        .collect::<Result<Vec<MovieItem>, _>>()
        .with_context(|| format!("Failed to parse items file {}", path.display()))?;

    info!("Loaded {} movies from {}", items.len(), path.display());
    Ok(items)
}

/// Node and relationship builders of the graph.
pub fn build_map<S>(
    store: S,
    templates: Arc<QueryTemplates>,
    items: Arc<[MovieItem]>,
    options: &BuildOptions,
) -> GraphBuildMap
where
    S: GraphStore + Clone + 'static,
{
    GraphBuildMap {
        node_builders: vec![
            Box::new(EntityBuilder::new(
                store.clone(),
                options.apply(MovieNodes::config()),
                templates.clone(),
                MovieNodes,
                items.clone(),
            )),
            Box::new(EntityBuilder::new(
                store.clone(),
                options.apply(GenreNodes::config()),
                templates.clone(),
                GenreNodes,
                items.clone(),
            )),
        ],
        rel_builders: vec![Box::new(EntityBuilder::new(
            store,
            options.apply(MovieGenreRels::config()),
            templates,
            MovieGenreRels,
            items,
        ))],
    }
}

pub fn constraints() -> Vec<Constraint> {
    [MOVIE_NODE_TYPE, GENRE_NODE_TYPE]
        .into_iter()
        .map(|node_type| Constraint {
            constraint_name: format!("{}_{}", node_type.to_lowercase(), DEFAULT_ID_PROPERTY),
            node_type: node_type.to_string(),
            node_property: DEFAULT_ID_PROPERTY.to_string(),
        })
        .collect()
}

pub fn full_text_indexes() -> Vec<Index> {
    vec![Index {
        index_name: "movie_title".to_string(),
        node_type: MOVIE_NODE_TYPE.to_string(),
        node_property: "title".to_string(),
    }]
}

pub fn vector_indexes() -> Vec<VectorIndex> {
    vec![VectorIndex {
        index_name: "genre_fake_vector".to_string(),
        node_type: GENRE_NODE_TYPE.to_string(),
        node_property: "fake_vector".to_string(),
        vector_size: NonZeroU32::new(FAKE_VECTOR_SIZE as u32).unwrap_or(NonZeroU32::MIN),
        similarity_metric: SimilarityMetric::Cosine,
    }]
}

/// The complete graph build, provisioning included.
pub fn graph_builder<S>(
    store: S,
    templates: Arc<QueryTemplates>,
    items: Arc<[MovieItem]>,
    options: &BuildOptions,
) -> GraphBuilder<S>
where
    S: GraphStore + Clone + 'static,
{
    let build_map = build_map(store.clone(), templates.clone(), items, options);
    GraphBuilder::new(store, templates, build_map)
        .with_constraints(constraints())
        .with_full_text_indexes(full_text_indexes())
        .with_vector_indexes(vector_indexes())
}
