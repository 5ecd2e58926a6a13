//! Repository abstractions over the document store.
//!
//! Repositories are the model layer: they resolve customer references,
//! invoke the derived-field calculators on every write, replay running
//! balances on every read, and compute summaries over filtered selections.

pub mod customer;
pub mod extraction;
pub mod ledger;
pub mod selling;

pub use customer::{CreateCustomerInput, CustomerError, CustomerRepository, UpdateCustomerInput};
pub use extraction::{ExtractionError, ExtractionUpdate, LeadExtractionRepository};
pub use ledger::{DailyView, LedgerEntryUpdate, LedgerError, LedgerRepository, LedgerSearchResult};
pub use selling::{LeadSellingRepository, SellingError, SellingUpdate};
