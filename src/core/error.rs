//! Typed error handling for paged results
//!
//! Every failure of the paging pipeline is a [`PagingError`]. Clients can
//! match on the variant to tell untrusted-input rejections apart from
//! programming errors and storage failures.
//!
//! # Error Categories
//!
//! - [`PagingError::OrderField`]: the requested sort field is not a plain,
//!   existing field of the element type (client error, 400)
//! - [`PagingError::MissingPageSize`]: a page was requested without a page size
//!   (programming error, 500)
//! - [`PagingError::NullSource`]: no data source was supplied (programming error, 500)
//! - [`PagingError::Source`]: the backing data source failed (500)
//!
//! # Example
//!
//! ```rust,ignore
//! use paged_source::prelude::*;
//!
//! match PagedResult::create(params, &source).await {
//!     Ok(page) => println!("{} of {}", page.data.len(), page.total),
//!     Err(PagingError::OrderField { field, .. }) => {
//!         println!("Cannot sort by '{}'", field);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::field::MAX_FIELD_NAME_LENGTH;

/// Why a sort field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFieldReason {
    /// The string is not a plain field name (expression, method call,
    /// indexer, literal, query fragment...)
    NotAFieldName,

    /// The string is a plain name but the element type has no such field
    UnknownField,
}

impl fmt::Display for OrderFieldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderFieldReason::NotAFieldName => write!(f, "not a plain field name"),
            OrderFieldReason::UnknownField => write!(f, "no such field"),
        }
    }
}

/// The error type of the paging pipeline
#[derive(Debug)]
pub enum PagingError {
    /// No data source was supplied
    NullSource,

    /// A page number was requested without a page size
    MissingPageSize,

    /// The sort field is not a plain, existing field of the element type
    ///
    /// Raised before any call reaches the data source.
    OrderField {
        /// The rejected input, truncated for display
        field: String,
        reason: OrderFieldReason,
    },

    /// The backing data source failed
    Source(anyhow::Error),
}

impl PagingError {
    /// Build an `OrderField` error, keeping at most a field-name's worth of input
    pub fn order_field(field: &str, reason: OrderFieldReason) -> Self {
        let mut field: String = field.chars().take(MAX_FIELD_NAME_LENGTH + 1).collect();
        if field.chars().count() > MAX_FIELD_NAME_LENGTH {
            field.pop();
            field.push('…');
        }
        PagingError::OrderField { field, reason }
    }

    /// Whether the error was caused by untrusted client input
    pub fn is_client_error(&self) -> bool {
        matches!(self, PagingError::OrderField { .. })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PagingError::OrderField { .. } => StatusCode::BAD_REQUEST,
            PagingError::MissingPageSize => StatusCode::INTERNAL_SERVER_ERROR,
            PagingError::NullSource => StatusCode::INTERNAL_SERVER_ERROR,
            PagingError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PagingError::OrderField { .. } => "ORDER_FIELD_INVALID",
            PagingError::MissingPageSize => "MISSING_PAGE_SIZE",
            PagingError::NullSource => "NULL_SOURCE",
            PagingError::Source(_) => "SOURCE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PagingError::OrderField { field, reason } => Some(serde_json::json!({
                "field": field,
                "reason": reason,
            })),
            _ => None,
        }
    }
}

impl fmt::Display for PagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagingError::NullSource => write!(f, "Data source is required"),
            PagingError::MissingPageSize => write!(f, "Page size is required when a page is requested"),
            PagingError::OrderField { field, reason } => {
                write!(f, "Cannot order by '{}': {}", field, reason)
            }
            PagingError::Source(e) => write!(f, "Data source error: {}", e),
        }
    }
}

impl std::error::Error for PagingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PagingError::Source(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for PagingError {
    fn from(err: anyhow::Error) -> Self {
        PagingError::Source(err)
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for PagingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "paging request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
