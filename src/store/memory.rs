use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{doc_id, merge_shallow, Collection, DocumentStore, StoreError};

/// In-process backend used by tests and development.
///
/// Each collection is an ordered vector of documents behind its own DashMap
/// shard lock, which gives the single-writer-per-collection behavior the
/// engines assume.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|docs| docs.clone())
            .unwrap_or_default())
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self.collections.get(&collection).and_then(|docs| {
            docs.iter().find(|doc| doc_id(doc) == Some(id)).cloned()
        }))
    }

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError> {
        self.collections.entry(collection).or_default().push(doc);
        Ok(())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, StoreError> {
        let mut docs = match self.collections.get_mut(&collection) {
            Some(docs) => docs,
            None => return Ok(None),
        };
        match docs.iter_mut().find(|doc| doc_id(doc) == Some(id)) {
            Some(doc) => {
                merge_shallow(doc, patch);
                Ok(Some(doc.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let mut docs = match self.collections.get_mut(&collection) {
            Some(docs) => docs,
            None => return Ok(false),
        };
        let before = docs.len();
        docs.retain(|doc| doc_id(doc) != Some(id));
        Ok(docs.len() < before)
    }

    async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        if let Some(mut docs) = self.collections.get_mut(&collection) {
            docs.clear();
        }
        Ok(())
    }
}
