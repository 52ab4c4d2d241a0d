//! Router builder utilities for paged list routes

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::PagingConfig;
use crate::core::{DataSource, PagedResult, PagingError, Params, Sortable};

/// State shared by the handlers of one paged route
pub struct PagedState<S: ?Sized> {
    pub source: Arc<S>,
    pub config: Arc<PagingConfig>,
}

impl<S: ?Sized> Clone for PagedState<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            config: self.config.clone(),
        }
    }
}

/// List one page of the source
///
/// `GET {path}?page=2&count=10&orderBy=name&desc=true`
///
/// The configured paging policy is applied to the query parameters before
/// the page is computed. An invalid `orderBy` answers 400.
pub async fn list_page<T, S>(
    State(state): State<PagedState<S>>,
    Query(params): Query<Params>,
) -> Result<PagedResult<T>, PagingError>
where
    T: Sortable + Serialize,
    S: DataSource<T> + ?Sized + 'static,
{
    let params = state.config.apply(params);
    tracing::debug!(
        page = ?params.page,
        count = ?params.count,
        desc = params.desc,
        "listing page"
    );
    PagedResult::create(params, state.source.as_ref()).await
}

/// Build a router serving pages of `source` at `path`
///
/// - GET {path} - One page of the source, as JSON
pub fn paged_router<T, S>(path: &str, source: Arc<S>, config: PagingConfig) -> Router
where
    T: Sortable + Serialize,
    S: DataSource<T> + ?Sized + 'static,
{
    let state = PagedState {
        source,
        config: Arc::new(config),
    };

    Router::new()
        .route(path, get(list_page::<T, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
