//! Aggregate summaries over record selections.
//!
//! Summaries are pure functions of the record slice passed in, recomputed
//! fresh per call; there is no cached or partial aggregation.

pub mod service;
pub mod types;

pub use service::SummaryService;
pub use types::{ExtractionSummary, LedgerSummary, SearchSummary, SellingSummary};
