//! Movie to Genre relationships.

use super::nodes::{genre_node_id, movie_node_id, GENRE_NODE_TYPE, MOVIE_NODE_TYPE};
use super::MovieItem;
use builder_core::{BuilderConfig, Properties, PropertyCastMap, Row};
use entity_builder::RowProducer;

pub const HAS_GENRE_REL_TYPE: &str = "HAS_GENRE";

/// One `HAS_GENRE` relationship per genre of an item.
pub struct MovieGenreRels;

impl MovieGenreRels {
    pub fn config() -> BuilderConfig {
        BuilderConfig::relationship(
            HAS_GENRE_REL_TYPE,
            MOVIE_NODE_TYPE,
            GENRE_NODE_TYPE,
            "movie-genre-rels.csv",
            PropertyCastMap::new().cast("strength", "toFloat"),
        )
    }
}

impl RowProducer<MovieItem> for MovieGenreRels {
    fn rows<'a>(&'a self, item: &'a MovieItem) -> Box<dyn Iterator<Item = Row> + 'a> {
        let movie_id = movie_node_id(&item.title);
        Box::new(item.genres().map(move |genre| {
            Row::relationship(movie_id.clone(), genre_node_id(genre), Properties::new())
                .with_property("strength", 1.0)
        }))
    }
}
