//! Daily battery ledger entries.
//!
//! This module implements the battery purchase ledger:
//! - Entry types with the embedded append-only weight log
//! - Derived-field calculation (credit from weight and rate)
//! - Validation of driver fields before persistence

pub mod derive;
pub mod types;

#[cfg(test)]
mod derive_props;

pub use derive::{apply_weight_logs, derive_entry_fields};
pub use types::{BatteryType, LedgerDerived, LedgerEntry, LedgerEntryInput, WeightLog};
