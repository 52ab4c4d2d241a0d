//! Macros for reducing boilerplate when declaring sortable record types
//!
//! These macros generate the field table and the dynamic field access of
//! the [`Sortable`](crate::core::sortable::Sortable) trait from a list of
//! struct fields.

/// Implement `Sortable` for a struct from a list of its fields
///
/// Each listed field becomes a sort key under its own name, or under the
/// name given with `as`. Field types must be `Clone` and convertible into
/// [`FieldValue`](crate::core::field::FieldValue) (strings, integers,
/// floats, booleans, UUIDs, UTC timestamps, and `Option`s of those).
/// Fields that are not listed can never be used to sort.
///
/// # Example
///
/// ```rust,ignore
/// use paged_source::prelude::*;
///
/// #[derive(Clone)]
/// pub struct Customer {
///     pub id: Uuid,
///     pub name: String,
///     pub signed_up: DateTime<Utc>,
///     pub password_hash: String,
/// }
///
/// impl_sortable!(Customer {
///     id,
///     name,
///     signed_up as "signedUp",
/// });
///
/// assert_eq!(Customer::sortable_fields(), &["id", "name", "signedUp"]);
/// ```
#[macro_export]
macro_rules! impl_sortable {
    (
        $type:ty {
            $( $field:ident $( as $alias:literal )? ),* $(,)?
        }
    ) => {
        impl $crate::core::sortable::Sortable for $type {
            fn sortable_fields() -> &'static [&'static str] {
                &[ $( $crate::__sortable_key!($field $(, $alias)?) ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                $(
                    if field == $crate::__sortable_key!($field $(, $alias)?) {
                        return Some($crate::core::field::FieldValue::from(
                            ::std::clone::Clone::clone(&self.$field),
                        ));
                    }
                )*
                None
            }
        }
    };
}

/// Sort key of a field listed in `impl_sortable!`
#[doc(hidden)]
#[macro_export]
macro_rules! __sortable_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $alias:literal) => {
        $alias
    };
}
