//! Document store abstraction.
//!
//! Every entity kind lives in its own addressable collection of schema-less
//! JSON documents. The capability trait is deliberately small (get-all,
//! get-by-id, insert, partial update, delete, clear) so the backing medium
//! can be swapped between an in-memory map and a flat-file directory without
//! touching the lifecycle engines. Typed records are validated at this
//! boundary: services read and write Rust structs, not raw JSON.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Named top-level collections, one per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Collection {
    #[strum(serialize = "quotes")]
    Quotes,
    #[strum(serialize = "inventory")]
    Inventory,
    #[strum(serialize = "claims")]
    Claims,
    #[strum(serialize = "trucks")]
    Trucks,
    #[strum(serialize = "activities")]
    Activities,
    #[strum(serialize = "users")]
    Users,
}

impl Collection {
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("corrupt document in {collection}: {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Capability interface over a single key-document mapping per collection.
///
/// Implementations must preserve insertion order in `get_all` (schedule
/// derivation relies on it) and serialize writers per collection: a partial
/// update is read-merge-write under the collection's write lock, last write
/// wins, no conflict detection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    async fn get_by_id(&self, collection: Collection, id: &str)
        -> Result<Option<Value>, StoreError>;

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError>;

    /// Shallow-merges `patch` into the stored document. Keys present in the
    /// patch overwrite, including explicit nulls (that is how a truck
    /// reference is cleared). Returns the merged document, or `None` when
    /// the id is unknown.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, StoreError>;

    /// Returns true when a document was removed.
    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StoreError>;

    async fn clear(&self, collection: Collection) -> Result<(), StoreError>;
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

/// Merges `patch` object fields into `doc` in place.
fn merge_shallow(doc: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (doc, patch) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
}

/// Typed facade over a [`DocumentStore`] backend.
///
/// Serialization failures here mean a stored document no longer matches the
/// record schema; they surface as [`StoreError::Corrupt`] rather than a
/// panic or a silent skip.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DocumentStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.backend.get_all(collection).await?;
        docs.into_iter()
            .map(|doc| {
                serde_json::from_value(doc).map_err(|e| StoreError::Corrupt {
                    collection: collection_name(collection),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    pub async fn find<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.backend.get_by_id(collection, id).await? {
            Some(doc) => serde_json::from_value(doc)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    collection: collection_name(collection),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub async fn insert<T: Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> Result<(), StoreError> {
        let doc = serde_json::to_value(record).map_err(|e| StoreError::Corrupt {
            collection: collection_name(collection),
            message: e.to_string(),
        })?;
        self.backend.insert(collection, doc).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Option<T>, StoreError> {
        match self.backend.update_by_id(collection, id, patch).await? {
            Some(doc) => serde_json::from_value(doc)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    collection: collection_name(collection),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub async fn remove(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        self.backend.delete_by_id(collection, id).await
    }

    pub async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        self.backend.clear(collection).await
    }

    /// Cheap connectivity probe used by the readiness endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.backend.get_all(Collection::Users).await.map(|_| ())
    }
}

fn collection_name(collection: Collection) -> &'static str {
    match collection {
        Collection::Quotes => "quotes",
        Collection::Inventory => "inventory",
        Collection::Claims => "claims",
        Collection::Trucks => "trucks",
        Collection::Activities => "activities",
        Collection::Users => "users",
    }
}
