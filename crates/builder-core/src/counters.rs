//! Aggregated write statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Counts of entities and properties affected by one or more transactions.
///
/// The default value is the zero sentinel returned for empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteCounters {
    pub nodes_created: u64,
    pub nodes_deleted: u64,
    pub relationships_created: u64,
    pub relationships_deleted: u64,
    pub properties_set: u64,
    pub labels_added: u64,
    pub indexes_added: u64,
    pub constraints_added: u64,
}

impl WriteCounters {
    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        *self == WriteCounters::default()
    }

    /// Whether any data was written, property and label changes included.
    ///
    /// Schema changes (indexes, constraints) are not data updates.
    pub fn contains_updates(&self) -> bool {
        self.nodes_created > 0
            || self.nodes_deleted > 0
            || self.relationships_created > 0
            || self.relationships_deleted > 0
            || self.properties_set > 0
            || self.labels_added > 0
    }
}

impl AddAssign for WriteCounters {
    fn add_assign(&mut self, other: Self) {
        self.nodes_created += other.nodes_created;
        self.nodes_deleted += other.nodes_deleted;
        self.relationships_created += other.relationships_created;
        self.relationships_deleted += other.relationships_deleted;
        self.properties_set += other.properties_set;
        self.labels_added += other.labels_added;
        self.indexes_added += other.indexes_added;
        self.constraints_added += other.constraints_added;
    }
}

impl Add for WriteCounters {
    type Output = WriteCounters;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for WriteCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(WriteCounters::default(), Add::add)
    }
}

impl fmt::Display for WriteCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes created: {}, relationships created: {}, properties set: {}, labels added: {}",
            self.nodes_created, self.relationships_created, self.properties_set, self.labels_added
        )?;
        if self.indexes_added > 0 || self.constraints_added > 0 {
            write!(
                f,
                ", indexes added: {}, constraints added: {}",
                self.indexes_added, self.constraints_added
            )?;
        }
        Ok(())
    }
}
