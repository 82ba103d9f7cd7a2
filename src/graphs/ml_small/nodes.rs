//! Movie and Genre nodes.

use super::MovieItem;
use builder_core::{BuilderConfig, Properties, PropertyCastMap, Row};
use entity_builder::RowProducer;
use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

pub const MOVIE_NODE_TYPE: &str = "Movie";
pub const GENRE_NODE_TYPE: &str = "Genre";

/// Length of the placeholder genre embedding.
pub const FAKE_VECTOR_SIZE: usize = 16;

fn name_based_id(name: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Stable identity of a movie node.
pub fn movie_node_id(title: &str) -> String {
    name_based_id(&format!("movie-{title}"))
}

/// Stable identity of a genre node.
pub fn genre_node_id(genre: &str) -> String {
    name_based_id(&format!("genre-{genre}"))
}

fn fake_vector() -> Value {
    let mut rng = rand::rng();
    let vector: Vec<f64> = (0..FAKE_VECTOR_SIZE).map(|_| rng.random()).collect();
    Value::from(vector)
}

/// One `Movie` node per item.
pub struct MovieNodes;

impl MovieNodes {
    pub fn config() -> BuilderConfig {
        BuilderConfig::node(
            MOVIE_NODE_TYPE,
            "movie-nodes.csv",
            PropertyCastMap::new().cast("title", "toString"),
        )
    }
}

impl RowProducer<MovieItem> for MovieNodes {
    fn rows<'a>(&'a self, item: &'a MovieItem) -> Box<dyn Iterator<Item = Row> + 'a> {
        let row = Row::node(movie_node_id(&item.title), Properties::new())
            .with_property("title", item.title.as_str());
        Box::new(std::iter::once(row))
    }
}

/// One `Genre` node per genre of an item.
///
/// Genres shared by several movies are produced once per movie; the
/// builder keeps the first.
pub struct GenreNodes;

impl GenreNodes {
    pub fn config() -> BuilderConfig {
        // fake_vector is bound as a list; in bulk-file mode it loads as its JSON text
        BuilderConfig::node(
            GENRE_NODE_TYPE,
            "genre-nodes.csv",
            PropertyCastMap::new()
                .cast("genre", "toString")
                .raw("fake_vector"),
        )
    }
}

impl RowProducer<MovieItem> for GenreNodes {
    fn rows<'a>(&'a self, item: &'a MovieItem) -> Box<dyn Iterator<Item = Row> + 'a> {
        Box::new(item.genres().map(|genre| {
            Row::node(genre_node_id(genre), Properties::new())
                .with_property("genre", genre)
                .with_property("fake_vector", fake_vector())
        }))
    }
}
