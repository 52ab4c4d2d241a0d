//! Extension traits for building and projecting paged results fluently

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;

use crate::core::error::PagingError;
use crate::core::params::Params;
use crate::core::result::PagedResult;
use crate::core::sortable::Sortable;
use crate::core::source::DataSource;

/// `source.to_paged_result(params)`, same as [`PagedResult::create`]
///
/// # Example
/// ```rust,ignore
/// let page = users.to_paged_result(Params::paged(1, 20)).await?;
/// ```
#[async_trait]
pub trait ToPagedResult<T> {
    async fn to_paged_result(&self, params: Params) -> Result<PagedResult<T>, PagingError>;
}

#[async_trait]
impl<T, S> ToPagedResult<T> for S
where
    T: Sortable,
    S: DataSource<T> + ?Sized,
{
    async fn to_paged_result(&self, params: Params) -> Result<PagedResult<T>, PagingError> {
        PagedResult::create(params, self).await
    }
}

/// Projection on a paged result that is still being computed
///
/// # Example
/// ```rust,ignore
/// let rows = PagedResult::create(params, &users)
///     .select(|user| UserRow::from(user))
///     .await?;
/// ```
pub trait PagedFutureExt<T>: Future<Output = Result<PagedResult<T>, PagingError>> + Sized {
    /// Map every element of the page once it is available
    fn select<'a, U, F>(self, f: F) -> BoxFuture<'a, Result<PagedResult<U>, PagingError>>
    where
        Self: Send + 'a,
        F: FnMut(T) -> U + Send + 'a,
        T: 'a,
        U: 'a,
    {
        Box::pin(async move { Ok(self.await?.select(f)) })
    }
}

impl<T, Fut> PagedFutureExt<T> for Fut where Fut: Future<Output = Result<PagedResult<T>, PagingError>> {}
