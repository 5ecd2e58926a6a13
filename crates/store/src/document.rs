//! Document trait and the store seam.
//!
//! The trait mirrors the semantics the application expects from its external
//! store driver: whole-collection loads, id lookups, create, replace with
//! last-write-wins, and delete. No store-specific query syntax appears in
//! the contract; filtering and sorting happen in the repositories, which is
//! acceptable at this data scale.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use kabadi_core::customer::Customer;
use kabadi_core::extraction::LeadExtraction;
use kabadi_core::ledger::LedgerEntry;
use kabadi_core::selling::LeadSelling;

use crate::error::StoreError;

/// A domain type stored as a document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this document type lives in.
    const COLLECTION: &'static str;

    /// The document's primary id.
    fn document_id(&self) -> Uuid;
}

impl Document for Customer {
    const COLLECTION: &'static str = "customers";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

impl Document for LedgerEntry {
    const COLLECTION: &'static str = "ledger_entries";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

impl Document for LeadExtraction {
    const COLLECTION: &'static str = "lead_extractions";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

impl Document for LeadSelling {
    const COLLECTION: &'static str = "lead_sellings";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

/// An untyped document, exposed for bulk maintenance jobs that must survive
/// malformed legacy records one item at a time.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Document id.
    pub id: Uuid,
    /// Document body.
    pub body: Value,
}

/// The store driver seam.
///
/// Writes to the same document are last-write-wins; no operation spans more
/// than one document atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads every document in the type's collection.
    async fn find_all<T: Document>(&self) -> Result<Vec<T>, StoreError>;

    /// Looks a document up by id.
    async fn find_by_id<T: Document>(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    /// Inserts a new document.
    async fn create<T: Document>(&self, doc: &T) -> Result<(), StoreError>;

    /// Replaces an existing document.
    async fn update_by_id<T: Document>(&self, id: Uuid, doc: &T) -> Result<(), StoreError>;

    /// Deletes a document; returns whether one existed.
    async fn delete_by_id<T: Document>(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Loads every document of a collection without deserializing.
    async fn find_all_raw(&self, collection: &'static str) -> Result<Vec<RawDocument>, StoreError>;

    /// Replaces a document body without going through the typed model.
    async fn update_raw(
        &self,
        collection: &'static str,
        id: Uuid,
        body: Value,
    ) -> Result<(), StoreError>;
}
