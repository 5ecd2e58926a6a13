//! Document-store layer for Kabadi.
//!
//! This crate provides:
//! - The [`DocumentStore`] trait, the seam to the external store driver
//! - An in-memory backend used by the repositories and tests
//! - Repository abstractions (the ORM-style model layer)
//! - The re-runnable derived-field backfill job

pub mod document;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use document::{Document, DocumentStore, RawDocument};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use migration::{MigrationFailure, MigrationReport, backfill_derived_fields};
pub use repositories::{
    CustomerRepository, LeadExtractionRepository, LeadSellingRepository, LedgerRepository,
};

use kabadi_shared::config::StoreConfig;

/// Establishes a connection to the configured document store.
///
/// Only the in-memory driver is bundled; production deployments plug a real
/// driver in behind [`DocumentStore`].
///
/// # Errors
///
/// Returns an error if the configured URL names an unsupported driver.
pub fn connect(config: &StoreConfig) -> Result<MemoryStore, StoreError> {
    if config.url.starts_with("memory://") {
        Ok(MemoryStore::new())
    } else {
        Err(StoreError::UnsupportedDriver(config.url.clone()))
    }
}
