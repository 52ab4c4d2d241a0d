//! Core module containing the paging pipeline and its fundamental types

pub mod error;
pub mod ext;
pub mod field;
pub mod order;
pub mod params;
pub mod query;
pub mod result;
pub mod sortable;
pub mod source;

pub use error::{ErrorResponse, OrderFieldReason, PagingError};
pub use ext::{PagedFutureExt, ToPagedResult};
pub use field::FieldValue;
pub use order::{SortDirection, SortSpec, resolve_order};
pub use params::Params;
pub use query::{Query, QueryOp, Queryable};
pub use result::PagedResult;
pub use sortable::Sortable;
pub use source::DataSource;
