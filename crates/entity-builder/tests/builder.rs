//! Tests for EntityBuilder create operations.

mod common;

use builder_core::{
    BuilderConfig, CoreError, Properties, PropertyCastMap, QueryTemplates, Row, WriteCounters,
};
use common::MemoryStore;
use entity_builder::{from_fn, BuildError, EntityBuilder, FnProducer};
use graph_store::StoreError;
use std::sync::Arc;
use tempfile::TempDir;

struct Item {
    title: &'static str,
    genres: &'static str,
}

fn items() -> Vec<Item> {
    vec![
        Item {
            title: "A",
            genres: "X|Y",
        },
        Item {
            title: "B",
            genres: "X",
        },
        Item {
            title: "A",
            genres: "X",
        },
    ]
}

fn templates() -> Arc<QueryTemplates> {
    Arc::new(QueryTemplates::embedded().unwrap())
}

fn title_row(item: &Item) -> Vec<Row> {
    vec![Row::node(format!("movie-{}", item.title), Properties::new())
        .with_property("title", item.title)]
}

fn genre_rels(item: &Item) -> Vec<Row> {
    item.genres
        .split('|')
        .map(|genre| {
            Row::relationship(
                format!("movie-{}", item.title),
                format!("genre-{genre}"),
                Properties::new(),
            )
            .with_property("strength", 1.0)
        })
        .collect()
}

fn movie_config() -> BuilderConfig {
    BuilderConfig::node(
        "Movie",
        "movie-nodes.csv",
        PropertyCastMap::new().cast("title", "toString"),
    )
}

fn rel_config() -> BuilderConfig {
    BuilderConfig::relationship(
        "HAS_GENRE",
        "Movie",
        "Genre",
        "movie-genre-rels.csv",
        PropertyCastMap::new().cast("strength", "toFloat"),
    )
}

type MovieBuilder<'a> =
    EntityBuilder<Item, FnProducer<fn(&Item) -> Vec<Row>>, &'a MemoryStore>;

fn movie_builder(store: &MemoryStore, config: BuilderConfig) -> MovieBuilder<'_> {
    EntityBuilder::new(
        store,
        config,
        templates(),
        from_fn(title_row as fn(&Item) -> Vec<Row>),
        items(),
    )
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let store = MemoryStore::new();
    let builder = movie_builder(&store, movie_config());

    let first = builder.create_nodes().await.unwrap();
    let second = builder.create_nodes().await.unwrap();

    assert_eq!(first.nodes_created, 2);
    assert_eq!(second.nodes_created, 0);
    assert!(!second.contains_updates());
}

#[tokio::test]
async fn test_bulk_file_is_not_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::with_import_dir(dir.path());
    let config = movie_config()
        .with_bulk_file(true)
        .with_import_dir(dir.path());
    let builder = movie_builder(&store, config.clone());

    let first = builder.create_nodes().await.unwrap();
    let second = builder.create_nodes().await.unwrap();

    assert_eq!(first.nodes_created, 2);
    assert_eq!(second.nodes_created, 2);
    assert!(config.out_path().exists());

    // one statement per run, the file carries the rows
    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.rows.is_none()));
    assert!(calls[0].query.starts_with("LOAD CSV WITH HEADERS"));
}

#[tokio::test]
async fn test_relationships_deduplicated_by_endpoint_pair() {
    let store = MemoryStore::new();
    let builder = EntityBuilder::new(
        &store,
        rel_config(),
        templates(),
        from_fn(genre_rels),
        items(),
    );

    let counters = builder.create_rels().await.unwrap();

    // A-X, A-Y, B-X; the second A-X is dropped
    assert_eq!(counters.relationships_created, 3);
    assert_eq!(store.calls()[0].rows, Some(3));
}

#[test]
fn test_duplicate_relationship_keeps_first_properties() {
    let store = MemoryStore::new();
    let builder = EntityBuilder::new(
        &store,
        rel_config(),
        templates(),
        from_fn(|_: &u8| {
            vec![
                Row::relationship("m1", "g1", Properties::new()).with_property("strength", 1.0),
                Row::relationship("m1", "g1", Properties::new()).with_property("strength", 0.1),
            ]
        }),
        vec![0u8],
    );

    let batch = builder.prepare().unwrap().unwrap();
    let rows = batch.rows.unwrap();

    assert_eq!(batch.row_count, 1);
    assert_eq!(rows[0]["strength"], serde_json::json!(1.0));
}

#[tokio::test]
async fn test_empty_input_returns_zero_without_store_call() {
    let store = MemoryStore::new();
    let builder = EntityBuilder::new(
        &store,
        movie_config(),
        templates(),
        from_fn(title_row),
        Vec::<Item>::new(),
    );

    let counters = builder.create_nodes().await.unwrap();

    assert_eq!(counters, WriteCounters::default());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_producer_yielding_nothing_returns_zero() {
    let store = MemoryStore::new();
    let builder = EntityBuilder::new(
        &store,
        movie_config(),
        templates(),
        from_fn(|_: &Item| Vec::new()),
        items(),
    );

    assert!(builder.create_nodes().await.unwrap().is_empty());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_schema_mismatch_before_store_io() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::with_import_dir(dir.path());
    let config = movie_config()
        .with_bulk_file(true)
        .with_import_dir(dir.path());
    let builder = EntityBuilder::new(
        &store,
        config.clone(),
        templates(),
        from_fn(|item: &Item| {
            vec![Row::node(item.title, Properties::new()).with_property("name", item.title)]
        }),
        items(),
    );

    let err = builder.create_nodes().await.unwrap_err();

    assert!(matches!(
        err,
        BuildError::Core(CoreError::SchemaMismatch { .. })
    ));
    assert!(store.calls().is_empty());
    assert!(!config.out_path().exists());
}

#[tokio::test]
async fn test_rows_split_into_transactions() {
    let store = MemoryStore::new();
    let builder = EntityBuilder::new(
        &store,
        movie_config().with_transaction_size(2),
        templates(),
        from_fn(|n: &u32| {
            vec![Row::node(n.to_string(), Properties::new()).with_property("title", n.to_string())]
        }),
        (0..5).collect::<Vec<u32>>(),
    );

    let counters = builder.create_nodes().await.unwrap();

    let chunks: Vec<Option<usize>> = store.calls().iter().map(|c| c.rows).collect();
    assert_eq!(chunks, vec![Some(2), Some(2), Some(1)]);
    assert_eq!(counters.nodes_created, 5);
    assert_eq!(counters.properties_set, 10);
}

#[tokio::test]
async fn test_failed_chunk_aborts_invocation() {
    let store = MemoryStore::failing_on(1);
    let builder = EntityBuilder::new(
        &store,
        movie_config().with_transaction_size(1),
        templates(),
        from_fn(|n: &u32| {
            vec![Row::node(n.to_string(), Properties::new()).with_property("title", "t")]
        }),
        (0..4).collect::<Vec<u32>>(),
    );

    let err = builder.create_nodes().await.unwrap_err();

    assert!(matches!(err, BuildError::Store(StoreError::Connection(_))));
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_kind_mismatch() {
    let store = MemoryStore::new();
    let builder = movie_builder(&store, movie_config());

    let err = builder.create_rels().await.unwrap_err();

    assert!(matches!(err, BuildError::EntityKindMismatch { .. }));
    assert!(store.calls().is_empty());
}
