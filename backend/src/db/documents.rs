use crate::db::store::BlobStore;
use crate::error::StoreError;
use crate::models::LunchbotDocument;

/// Reads the document stored under `key`.
///
/// Reads fail open: a missing key, a store error or an undecodable blob all
/// yield an empty document.
pub async fn load_document(store: &dyn BlobStore, key: &str) -> LunchbotDocument {
    let bytes = match store.get(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return LunchbotDocument::default(),
        Err(e) => {
            tracing::warn!("Failed to read document '{}', starting from empty: {}", key, e);
            return LunchbotDocument::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Stored document '{}' is not valid, starting from empty: {}", key, e);
            LunchbotDocument::default()
        }
    }
}

/// Writes the whole document under `key`. Writes fail closed.
pub async fn save_document(
    store: &dyn BlobStore,
    key: &str,
    document: &LunchbotDocument,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(document)?;
    store.set(key, &bytes).await
}

pub async fn delete_document(store: &dyn BlobStore, key: &str) -> Result<(), StoreError> {
    store.delete(key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryBlobStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl BlobStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn test_absent_document_is_empty() {
        let store = MemoryBlobStore::new();
        assert_eq!(load_document(&store, "doc").await, LunchbotDocument::default());
    }

    #[tokio::test]
    async fn test_read_failures_fail_open() {
        assert_eq!(load_document(&BrokenStore, "doc").await, LunchbotDocument::default());

        let store = MemoryBlobStore::new();
        store.set("doc", b"{not json").await.unwrap();
        assert_eq!(load_document(&store, "doc").await, LunchbotDocument::default());
    }

    #[tokio::test]
    async fn test_write_failures_fail_closed() {
        let result = save_document(&BrokenStore, "doc", &LunchbotDocument::default()).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryBlobStore::new();
        let mut document = LunchbotDocument::default();
        document.begin_pairing("a", "b");
        document.add_topic("a", "rust");

        save_document(&store, "doc", &document).await.unwrap();
        assert_eq!(load_document(&store, "doc").await, document);

        delete_document(&store, "doc").await.unwrap();
        assert_eq!(load_document(&store, "doc").await, LunchbotDocument::default());
    }
}
