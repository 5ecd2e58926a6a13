//! Lead extraction records.
//!
//! Tracks batches of scrap batteries sent for lead extraction: the assumed
//! yield percentage, the lead weight it implies, and how much lead has come
//! back so far.

pub mod derive;
pub mod types;

pub use derive::derive_extraction_fields;
pub use types::{ExtractionDerived, LeadExtraction, LeadExtractionInput};
