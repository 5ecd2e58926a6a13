//! Lead selling records.
//!
//! Tracks lead sold onward to buyers: credit from weight, rate and commute
//! rent, payments received against it, and the per-record balance.

pub mod derive;
pub mod types;

pub use derive::derive_selling_fields;
pub use types::{LeadSelling, LeadSellingInput, SellingDerived};
