//! Paged results and the count → sort → page pipeline

use axum::Json;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::core::error::PagingError;
use crate::core::order::{SortSpec, resolve_order};
use crate::core::params::Params;
use crate::core::query::Queryable;
use crate::core::sortable::Sortable;
use crate::core::source::DataSource;

/// One materialized page of a data source
///
/// Carries the (possibly adjusted) parameters it was computed from, the
/// page contents, and the element count of the whole unpaged source.
///
/// # Example
///
/// ```rust,ignore
/// let page = PagedResult::create(Params::paged(2, 10), &orders).await?;
/// assert_eq!(page.total, orders.len());
///
/// let rows = page.select(|order| OrderRow::from(order));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Effective parameters
    ///
    /// `count` is clamped to `total`; `page` is reset to 1 when the
    /// requested page lies past the last one.
    #[serde(flatten)]
    pub params: Params,

    /// The page contents
    pub data: Vec<T>,

    /// Number of elements in the whole source, independent of paging and sorting
    pub total: usize,
}

impl<T> PagedResult<T> {
    /// Wrap a page that was already computed elsewhere, as-is
    pub fn from_page(params: Params, data: Vec<T>, total: usize) -> Self {
        Self {
            params,
            data,
            total,
        }
    }

    pub fn page(&self) -> Option<usize> {
        self.params.page
    }

    pub fn count(&self) -> Option<usize> {
        self.params.count
    }

    /// Number of pages, 0 for an empty source or a page size of 0
    ///
    /// Without a page size the whole source counts as a single page.
    pub fn total_pages(&self) -> usize {
        match self.params.count {
            _ if self.total == 0 => 0,
            Some(0) => 0,
            Some(size) => self.total.div_ceil(size),
            None => 1,
        }
    }

    /// Whether there is a next page
    pub fn has_next(&self) -> bool {
        self.params
            .page
            .is_some_and(|page| page < self.total_pages())
    }

    /// Whether there is a previous page
    pub fn has_prev(&self) -> bool {
        self.params.page.is_some_and(|page| page > 1)
    }

    /// Map every element of the page, keeping parameters and total
    pub fn select<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            params: self.params,
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Like [`select`](Self::select), leaving this result untouched
    pub fn select_ref<U, F>(&self, f: F) -> PagedResult<U>
    where
        F: FnMut(&T) -> U,
    {
        PagedResult {
            params: self.params.clone(),
            data: self.data.iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Map every element with a fallible function, stopping at the first error
    pub fn try_select<U, E, F>(self, f: F) -> Result<PagedResult<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PagedResult {
            params: self.params,
            data: self.data.into_iter().map(f).collect::<Result<_, _>>()?,
            total: self.total,
        })
    }

    /// Map every element with an async function, one element at a time
    pub async fn select_async<U, F, Fut>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = U>,
    {
        let data: Vec<U> = futures::stream::iter(self.data).then(f).collect().await;
        PagedResult {
            params: self.params,
            data,
            total: self.total,
        }
    }
}

impl<T: Sortable> PagedResult<T> {
    /// Compute a page of `source`
    ///
    /// Validates the parameters and resolves the sort field first, so a
    /// rejected request never reaches the source. Then counts the whole
    /// source, orders it, selects the page window (falling back to page 1
    /// when the requested page is past the end) and materializes it.
    pub async fn create<S>(params: Params, source: &S) -> Result<Self, PagingError>
    where
        S: DataSource<T> + ?Sized,
    {
        params.validate()?;
        let order = params
            .order_field()
            .map(|field| resolve_order::<T>(field, params.desc))
            .transpose()?;

        let total = count_stage::<T, S>(source).await?;
        let sorted = sort_stage(Queryable::new(source), order);
        let (window, page) = page_stage(sorted, &params, order.is_some(), total).await?;

        let data = match window {
            Some(window) => window.to_vec().await?,
            None => Vec::new(),
        };

        let params = Params {
            count: params.count.map(|count| count.min(total)),
            page,
            ..params
        };

        Ok(Self {
            params,
            data,
            total,
        })
    }

    /// [`create`](Self::create) for a source that may be missing
    pub async fn create_from<S>(params: Params, source: Option<&S>) -> Result<Self, PagingError>
    where
        S: DataSource<T> + ?Sized,
    {
        let source = source.ok_or(PagingError::NullSource)?;
        Self::create(params, source).await
    }
}

async fn count_stage<T, S>(source: &S) -> Result<usize, PagingError>
where
    S: DataSource<T> + ?Sized,
{
    let total = source.count().await?;
    tracing::debug!(total, "counted source");
    Ok(total)
}

fn sort_stage<'a, T, S>(query: Queryable<'a, T, S>, order: Option<SortSpec>) -> Queryable<'a, T, S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    match order {
        Some(spec) => query.order_by(spec),
        // skip/take needs an explicit order in front of it
        None if !query.is_ordered() => query.order_stable(),
        None => query,
    }
}

/// Select the page window; returns it with the effective page number
///
/// `None` as window means the result has no data and the source need not
/// be queried again.
async fn page_stage<'a, T, S>(
    sorted: Queryable<'a, T, S>,
    params: &Params,
    custom_order: bool,
    total: usize,
) -> Result<(Option<Queryable<'a, T, S>>, Option<usize>), PagingError>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    let Some(page) = params.page() else {
        return Ok((None, None));
    };
    let count = params.count.ok_or(PagingError::MissingPageSize)?;

    if total == 0 {
        return Ok((None, Some(page)));
    }

    // a page never holds more than the whole source, so the window stays
    // within what a store can express
    let take = count.min(total);
    let skip = (page - 1).saturating_mul(count);

    if skip < total {
        let window = if custom_order {
            sorted.clone().skip(skip).take(take)
        } else {
            sorted
                .clone()
                .skip(skip)
                .order_stable()
                .take(take)
                .order_stable()
        };

        if window.any().await? {
            tracing::debug!(page, skip, take, "selected page window");
            return Ok((Some(window), Some(page)));
        }
    }

    tracing::debug!(
        requested_page = page,
        total,
        "requested page is past the last page, falling back to page 1"
    );
    Ok((Some(sorted.take(take)), Some(1)))
}

impl<T: Serialize> IntoResponse for PagedResult<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
