//! Customer identity and reference resolution.
//!
//! Customers own every entry type but carry no back-references; the relation
//! is resolved only by query, never traversed from the customer outward.

pub mod types;

pub use types::{Customer, CustomerRef, normalize_name};
