//! In-memory document store for tests.

use crate::traits::{DocumentStore, LedgerResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Stores appended documents per collection, in append order.
/// Tests assert against [`MemoryDocumentStore::documents`].
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(Uuid, serde_json::Value)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a collection's documents, in append order.
    pub fn documents(&self, collection: &str) -> Vec<serde_json::Value> {
        self.collections
            .lock()
            .expect("document store lock poisoned")
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of documents appended to a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .expect("document store lock poisoned")
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn append(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> LedgerResult<Uuid> {
        let id = Uuid::new_v4();
        self.collections
            .lock()
            .expect("document store lock poisoned")
            .entry(collection.to_string())
            .or_default()
            .push((id, document));
        Ok(id)
    }
}
