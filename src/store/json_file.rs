use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{doc_id, merge_shallow, Collection, DocumentStore, StoreError};

/// Flat-file backend: one JSON array per collection under a data directory.
///
/// Every mutation is a whole-file read-modify-write guarded by a single
/// async lock, then an atomic rename so readers never observe a partially
/// written file. A missing file reads as an empty collection.
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    async fn read_collection(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let path = self.collection_path(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Backend(format!("{} is not a JSON array: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_collection(
        &self,
        collection: Collection,
        docs: &[Value],
    ) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(docs)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let tmp = tmp_path(&path);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        self.read_collection(collection).await
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let docs = self.read_collection(collection).await?;
        Ok(docs.into_iter().find(|doc| doc_id(doc) == Some(id)))
    }

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut docs = self.read_collection(collection).await?;
        docs.push(doc);
        self.write_collection(collection, &docs).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut docs = self.read_collection(collection).await?;
        let updated = match docs.iter_mut().find(|doc| doc_id(doc) == Some(id)) {
            Some(doc) => {
                merge_shallow(doc, patch);
                Some(doc.clone())
            }
            None => None,
        };
        if updated.is_some() {
            self.write_collection(collection, &docs).await?;
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut docs = self.read_collection(collection).await?;
        let before = docs.len();
        docs.retain(|doc| doc_id(doc) != Some(id));
        let removed = docs.len() < before;
        if removed {
            self.write_collection(collection, &docs).await?;
        }
        Ok(removed)
    }

    async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_collection(collection, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_documents_through_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store
            .insert(Collection::Quotes, json!({"id": "a", "name": "Acme"}))
            .await
            .unwrap();
        store
            .insert(Collection::Quotes, json!({"id": "b", "name": "Globex"}))
            .await
            .unwrap();

        let docs = store.get_all(Collection::Quotes).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(doc_id(&docs[0]), Some("a"));
        assert_eq!(doc_id(&docs[1]), Some("b"));

        // A fresh handle sees the persisted state
        let reopened = JsonFileStore::new(dir.path());
        let docs = reopened.get_all(Collection::Quotes).await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.get_all(Collection::Claims).await.unwrap().is_empty());
        assert!(store
            .get_by_id(Collection::Claims, "anything")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_and_delete_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store
            .insert(Collection::Trucks, json!({"id": "t1", "status": "Available"}))
            .await
            .unwrap();

        let merged = store
            .update_by_id(Collection::Trucks, "t1", json!({"status": "In Service"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(merged["status"], "In Service");

        assert!(store.delete_by_id(Collection::Trucks, "t1").await.unwrap());
        assert!(store.get_all(Collection::Trucks).await.unwrap().is_empty());
    }
}
