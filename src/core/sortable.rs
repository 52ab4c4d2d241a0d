//! The per-type field table used to resolve sort fields

use crate::core::field::FieldValue;

/// Trait for element types that can be ordered by field name.
///
/// The field table is the only place a sort request can name a field: a
/// requested name is matched exactly against [`Sortable::sortable_fields`]
/// and never interpreted in any other way.
///
/// Implement it by hand or with [`impl_sortable!`](crate::impl_sortable).
pub trait Sortable: Send + Sync + 'static {
    /// Names of the fields that may be used as a sort key
    fn sortable_fields() -> &'static [&'static str];

    /// Get the value of a sortable field by name
    ///
    /// Returns `None` for names outside of [`Sortable::sortable_fields`].
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Look up `name` in the field table, returning the table's own entry
    fn find_field(name: &str) -> Option<&'static str> {
        Self::sortable_fields()
            .iter()
            .copied()
            .find(|field| *field == name)
    }
}

// Scalar element types have no fields; they can still be paged.
macro_rules! impl_fieldless {
    ($($type:ty),* $(,)?) => {
        $(
            impl Sortable for $type {
                fn sortable_fields() -> &'static [&'static str] {
                    &[]
                }

                fn field_value(&self, _field: &str) -> Option<FieldValue> {
                    None
                }
            }
        )*
    };
}

impl_fieldless!(String, i32, i64, u32, u64, usize, f64, bool, uuid::Uuid);
