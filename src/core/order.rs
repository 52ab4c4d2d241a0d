//! Sort field resolution
//!
//! Turns the caller-supplied `order_by` string into a [`SortSpec`]. This is
//! the only boundary between untrusted input and the data source: a sort spec
//! can only be built from an entry of the element type's field table, so
//! whatever the caller sent is never forwarded to a store.

use serde::Serialize;

use crate::core::error::{OrderFieldReason, PagingError};
use crate::core::field::is_plain_field_name;
use crate::core::sortable::Sortable;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction from a `desc` flag
    pub fn from_desc(desc: bool) -> Self {
        if desc { SortDirection::Desc } else { SortDirection::Asc }
    }

    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A resolved ordering: a field from a type's field table and a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    /// Field name, always an entry of [`Sortable::sortable_fields`]
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn is_desc(&self) -> bool {
        self.direction == SortDirection::Desc
    }
}

/// Resolve a sort field name against `T`'s field table
///
/// The name must have the shape of a plain field name and match a
/// sortable field of `T` exactly. Anything else is rejected with
/// [`PagingError::OrderField`].
pub fn resolve_order<T: Sortable>(name: &str, desc: bool) -> Result<SortSpec, PagingError> {
    if !is_plain_field_name(name) {
        let shown: String = name.chars().take(32).collect();
        tracing::warn!(field = %shown, "rejected sort expression");
        return Err(PagingError::order_field(name, OrderFieldReason::NotAFieldName));
    }

    let Some(field) = T::find_field(name) else {
        tracing::warn!(field = %name, "rejected unknown sort field");
        return Err(PagingError::order_field(name, OrderFieldReason::UnknownField));
    };

    Ok(SortSpec {
        field,
        direction: SortDirection::from_desc(desc),
    })
}
