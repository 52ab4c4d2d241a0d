//! Declarative helpers for sortable record types

pub mod macros;
