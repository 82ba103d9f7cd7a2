//! Graph store abstraction.
//!
//! Builders talk to the store only through [`GraphStore`]. Rows are split
//! into transactions by [`TransactionRunner`], which executes them strictly
//! in sequence and sums the reported counters.

mod dry_run;
mod error;
mod runner;
mod traits;

pub use dry_run::DryRunStore;
pub use error::StoreError;
pub use runner::TransactionRunner;
pub use traits::{GraphStore, QueryParams};
