//! In-memory document store backend.
//!
//! Stands in for the external store driver in tests and single-process
//! deployments. Collections are concurrent maps of JSON documents keyed by
//! id; UUID v7 keys keep iteration in rough insertion order, though
//! repositories never rely on that and always sort explicitly.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::document::{Document, DocumentStore, RawDocument};
use crate::error::StoreError;

/// An in-memory [`DocumentStore`] implementation.
///
/// Cheap to clone; clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<&'static str, BTreeMap<Uuid, Value>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &'static str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    /// Returns true if the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &'static str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all<T: Document>(&self) -> Result<Vec<T>, StoreError> {
        let Some(docs) = self.collections.get(T::COLLECTION) else {
            return Ok(Vec::new());
        };

        docs.values()
            .map(|body| serde_json::from_value(body.clone()).map_err(StoreError::from))
            .collect()
    }

    async fn find_by_id<T: Document>(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let Some(docs) = self.collections.get(T::COLLECTION) else {
            return Ok(None);
        };

        docs.get(&id)
            .map(|body| serde_json::from_value(body.clone()).map_err(StoreError::from))
            .transpose()
    }

    async fn create<T: Document>(&self, doc: &T) -> Result<(), StoreError> {
        let id = doc.document_id();
        let body = serde_json::to_value(doc)?;

        let mut docs = self.collections.entry(T::COLLECTION).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Duplicate {
                collection: T::COLLECTION,
                id,
            });
        }
        docs.insert(id, body);
        Ok(())
    }

    async fn update_by_id<T: Document>(&self, id: Uuid, doc: &T) -> Result<(), StoreError> {
        let body = serde_json::to_value(doc)?;

        let mut docs = self.collections.entry(T::COLLECTION).or_default();
        if !docs.contains_key(&id) {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        }
        // Last-write-wins: no version check, matching the driver contract.
        docs.insert(id, body);
        Ok(())
    }

    async fn delete_by_id<T: Document>(&self, id: Uuid) -> Result<bool, StoreError> {
        let Some(mut docs) = self.collections.get_mut(T::COLLECTION) else {
            return Ok(false);
        };
        Ok(docs.remove(&id).is_some())
    }

    async fn find_all_raw(&self, collection: &'static str) -> Result<Vec<RawDocument>, StoreError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .map(|(id, body)| RawDocument {
                id: *id,
                body: body.clone(),
            })
            .collect())
    }

    async fn update_raw(
        &self,
        collection: &'static str,
        id: Uuid,
        body: Value,
    ) -> Result<(), StoreError> {
        let mut docs = self.collections.entry(collection).or_default();
        if !docs.contains_key(&id) {
            return Err(StoreError::NotFound { collection, id });
        }
        docs.insert(id, body);
        Ok(())
    }
}
