//! # paged-source
//!
//! Paged, sorted and counted result sets over any lazy, countable data source.
//!
//! ## Features
//!
//! - **One Call Per Page**: data and the total count of the unpaged source come back together
//! - **Safe Sorting**: sort fields resolve against a per-type field table, never parsed
//! - **Boundary Correction**: a page past the end falls back to page 1 instead of coming back empty
//! - **Projection**: map a page to another element type while keeping its metadata
//! - **Pluggable Sources**: in-memory collections, PostgreSQL, or your own `DataSource`
//! - **HTTP Ready**: parameters parse from query strings, results and errors render as JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paged_source::prelude::*;
//!
//! #[derive(Clone, Serialize)]
//! pub struct Customer {
//!     pub name: String,
//!     pub age: i64,
//!     pub password_hash: String,
//! }
//!
//! impl_sortable!(Customer { name, age });
//!
//! let source = InMemorySource::from(customers);
//!
//! // Second page of 10, oldest first
//! let page = PagedResult::create(Params::paged(2, 10).order_by_desc("age"), &source).await?;
//! println!("{} of {}", page.data.len(), page.total);
//!
//! // Rejected before the source sees anything
//! let err = source
//!     .to_paged_result(Params::paged(1, 10).order_by("password_hash"))
//!     .await
//!     .unwrap_err();
//! assert!(err.is_client_error());
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{OrderFieldReason, PagingError},
        ext::{PagedFutureExt, ToPagedResult},
        field::FieldValue,
        order::{SortDirection, SortSpec},
        params::Params,
        result::PagedResult,
        sortable::Sortable,
        source::DataSource,
    };

    // === Macros ===
    pub use crate::impl_sortable;

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemorySource;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresSource;
    pub use crate::storage::SqlTable;

    // === Config ===
    pub use crate::config::PagingConfig;

    // === Server ===
    pub use crate::server::{paged_router, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
