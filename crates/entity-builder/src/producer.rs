//! Row generation contract.

use builder_core::Row;

/// Per-entity strategy turning one source item into rows.
///
/// Implementations are pure functions of the item and their own static
/// configuration: no I/O. One item may yield zero, one or many rows.
pub trait RowProducer<I>: Send + Sync {
    fn rows<'a>(&'a self, item: &'a I) -> Box<dyn Iterator<Item = Row> + 'a>;
}

/// Adapts a closure into a [`RowProducer`].
pub struct FnProducer<F>(pub F);

impl<I, F> RowProducer<I> for FnProducer<F>
where
    F: Fn(&I) -> Vec<Row> + Send + Sync,
{
    fn rows<'a>(&'a self, item: &'a I) -> Box<dyn Iterator<Item = Row> + 'a> {
        Box::new((self.0)(item).into_iter())
    }
}

/// Build a [`RowProducer`] from a closure.
pub fn from_fn<I, F>(f: F) -> FnProducer<F>
where
    F: Fn(&I) -> Vec<Row> + Send + Sync,
{
    FnProducer(f)
}
