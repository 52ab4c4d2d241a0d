//! The data source contract

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::core::query::Query;
use crate::core::sortable::Sortable;

/// Trait for sequences a paged result can be computed from
///
/// Implementations evaluate deferred [`Query`] values: an ordered list of
/// orderings and skip/take windows. The framework is agnostic to the
/// underlying storage mechanism; every capability may suspend.
///
/// A source is only ever read. Orderings inside a query always carry a
/// field name taken from the element type's field table, never raw caller
/// input.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Count every element of the source, without materializing it
    async fn count(&self) -> Result<usize>;

    /// Whether evaluating `query` yields at least one element
    async fn any(&self, query: &Query) -> Result<bool>;

    /// Evaluate `query` into a concrete sequence
    async fn fetch(&self, query: &Query) -> Result<Vec<T>>;

    /// Whether the source, before any query is applied, already has an
    /// explicit order
    fn is_ordered(&self) -> bool {
        false
    }
}

#[async_trait]
impl<T> DataSource<T> for Vec<T>
where
    T: Sortable + Clone,
{
    async fn count(&self) -> Result<usize> {
        Ok(self.len())
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        Ok(!query.select_from(self).is_empty())
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        Ok(query.select_from(self).into_iter().cloned().collect())
    }
}

#[async_trait]
impl<T, S> DataSource<T> for Arc<S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    async fn count(&self) -> Result<usize> {
        (**self).count().await
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        (**self).any(query).await
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        (**self).fetch(query).await
    }

    fn is_ordered(&self) -> bool {
        (**self).is_ordered()
    }
}
