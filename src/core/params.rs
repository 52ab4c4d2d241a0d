//! Paging and sorting parameters

use serde::{Deserialize, Serialize};

use crate::core::error::PagingError;

/// Paging and sorting parameters
///
/// This structure is used to extract paging parameters from URL query
/// strings and is carried, possibly adjusted, by every [`PagedResult`].
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_items(
///     Query(params): Query<Params>,
/// ) -> Result<PagedResult<Item>, PagingError> {
///     PagedResult::create(params, &items).await
/// }
///
/// // Usage:
/// GET /items?page=2&count=10
/// GET /items?page=1&count=20&orderBy=created_at&desc=true
/// ```
///
/// [`PagedResult`]: crate::core::result::PagedResult
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    /// Number of items per page
    ///
    /// Absent means no paging was requested.
    pub count: Option<usize>,

    /// Page number (starts at 1)
    ///
    /// Absent means the result carries no data. There is no implicit
    /// "return everything".
    pub page: Option<usize>,

    /// Name of the field to sort by
    pub order_by: Option<String>,

    /// Sort descending when `order_by` is set
    pub desc: bool,
}

impl Params {
    /// Empty parameters: no paging, no ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a page of `count` items
    pub fn paged(page: usize, count: usize) -> Self {
        Self {
            page: Some(page),
            count: Some(count),
            ..Self::default()
        }
    }

    /// Set the page size
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the page number
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Sort ascending by `field`
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self.desc = false;
        self
    }

    /// Sort descending by `field`
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self.desc = true;
        self
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> Option<usize> {
        self.page.map(|page| page.max(1))
    }

    /// The requested sort field, if any
    ///
    /// Blank values count as "no ordering requested". Surrounding whitespace
    /// is not part of the name.
    pub fn order_field(&self) -> Option<&str> {
        self.order_by
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }

    /// Check the page/count invariant
    ///
    /// A page number cannot be interpreted without a page size.
    pub fn validate(&self) -> Result<(), PagingError> {
        if self.page.is_some() && self.count.is_none() {
            return Err(PagingError::MissingPageSize);
        }
        Ok(())
    }
}
