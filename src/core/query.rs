//! Lazy query values
//!
//! A [`Query`] is an immutable list of ordering and windowing operations,
//! applied left to right by a data source when it is finally evaluated.
//! A [`Queryable`] pairs a query with the source it will run against. Every
//! builder method consumes the value and returns a new one, so pipeline
//! stages hand queries to each other without sharing mutable state.

use std::marker::PhantomData;

use anyhow::Result;

use crate::core::field::FieldValue;
use crate::core::order::SortSpec;
use crate::core::sortable::Sortable;
use crate::core::source::DataSource;

/// One deferred operation on a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    /// Order by a resolved field
    OrderBy(SortSpec),

    /// Order by a constant key: keeps the current order, but counts as an
    /// explicit ordering for stores that require one around skip/take
    OrderStable,

    /// Drop the first `n` elements
    Skip(usize),

    /// Keep at most `n` elements
    Take(usize),
}

impl QueryOp {
    pub fn is_ordering(&self) -> bool {
        matches!(self, QueryOp::OrderBy(_) | QueryOp::OrderStable)
    }
}

/// An immutable, deferred query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    ops: Vec<QueryOp>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations in application order
    pub fn ops(&self) -> &[QueryOp] {
        &self.ops
    }

    fn push(mut self, op: QueryOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn order_by(self, spec: SortSpec) -> Self {
        self.push(QueryOp::OrderBy(spec))
    }

    pub fn order_stable(self) -> Self {
        self.push(QueryOp::OrderStable)
    }

    pub fn skip(self, n: usize) -> Self {
        self.push(QueryOp::Skip(n))
    }

    pub fn take(self, n: usize) -> Self {
        self.push(QueryOp::Take(n))
    }

    /// Whether the last operation establishes an order
    ///
    /// `None` when the query is empty: the answer then depends on the source.
    pub fn ends_ordered(&self) -> Option<bool> {
        self.ops.last().map(QueryOp::is_ordering)
    }

    /// Evaluate the query over an in-memory slice
    ///
    /// Orderings are stable: elements that compare equal keep their relative
    /// order, and `OrderStable` leaves the sequence untouched.
    pub fn select_from<'a, T: Sortable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut selected: Vec<&T> = items.iter().collect();
        for op in &self.ops {
            match op {
                QueryOp::OrderBy(spec) => {
                    // sort_by is stable; swapping the operands for descending keeps it so
                    selected.sort_by(|a, b| {
                        let left = a.field_value(spec.field).unwrap_or(FieldValue::Null);
                        let right = b.field_value(spec.field).unwrap_or(FieldValue::Null);
                        if spec.is_desc() {
                            right.total_cmp(&left)
                        } else {
                            left.total_cmp(&right)
                        }
                    });
                }
                QueryOp::OrderStable => {}
                QueryOp::Skip(n) => {
                    let n = (*n).min(selected.len());
                    selected.drain(..n);
                }
                QueryOp::Take(n) => selected.truncate(*n),
            }
        }
        selected
    }
}

/// A query bound to the source it will be evaluated against
pub struct Queryable<'a, T, S: ?Sized> {
    source: &'a S,
    query: Query,
    _element: PhantomData<fn() -> T>,
}

impl<T, S: ?Sized> Clone for Queryable<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            query: self.query.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, S: ?Sized> std::fmt::Debug for Queryable<'_, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queryable").field("query", &self.query).finish()
    }
}

impl<'a, T, S> Queryable<'a, T, S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    /// The whole source, with no operation applied yet
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            query: Query::new(),
            _element: PhantomData,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    fn map(self, f: impl FnOnce(Query) -> Query) -> Self {
        Self {
            source: self.source,
            query: f(self.query),
            _element: PhantomData,
        }
    }

    /// Whether the sequence is already an ordered one
    pub fn is_ordered(&self) -> bool {
        self.query
            .ends_ordered()
            .unwrap_or_else(|| self.source.is_ordered())
    }

    pub fn order_by(self, spec: SortSpec) -> Self {
        self.map(|q| q.order_by(spec))
    }

    pub fn order_stable(self) -> Self {
        self.map(Query::order_stable)
    }

    pub fn skip(self, n: usize) -> Self {
        self.map(|q| q.skip(n))
    }

    pub fn take(self, n: usize) -> Self {
        self.map(|q| q.take(n))
    }

    /// Whether the query yields at least one element
    pub async fn any(&self) -> Result<bool> {
        self.source.any(&self.query).await
    }

    /// Evaluate the query
    pub async fn to_vec(&self) -> Result<Vec<T>> {
        self.source.fetch(&self.query).await
    }
}
