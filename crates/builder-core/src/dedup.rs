//! First-occurrence-wins deduplication.

use crate::row::{Identity, Row};
use std::collections::HashSet;

/// Outcome of [`dedup_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated {
    /// One row per identity, in first-occurrence order.
    pub rows: Vec<Row>,
    /// Number of later duplicates that were dropped.
    pub discarded: usize,
}

/// Keep the first row of every identity and drop the rest.
///
/// Node rows key on their id, relationship rows on the ordered
/// (source, target) pair. Properties of dropped rows are lost.
pub fn dedup_rows(rows: Vec<Row>) -> Deduplicated {
    let total = rows.len();
    let mut seen: HashSet<Identity> = HashSet::with_capacity(total);
    let rows: Vec<Row> = rows
        .into_iter()
        .filter(|row| seen.insert(row.identity.clone()))
        .collect();

    Deduplicated {
        discarded: total - rows.len(),
        rows,
    }
}
