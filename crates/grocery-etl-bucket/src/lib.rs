//! Abstractions over cloud object storage backends used by the grocery sales ETL.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use thiserror::Error;

/// Connection parameters for a GCS-backed bucket. The service account path
/// is explicit configuration rather than a process-global environment
/// variable, so multiple stores can coexist in one process.
#[derive(Debug, Clone, Default)]
pub struct GcsConfig {
    pub bucket: String,
    pub service_account_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum BucketError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("object store error: {0}")]
    Store(String),
    #[error("object not found: {0}")]
    NotFound(String),
}

impl BucketError {
    fn from_store(key: &str, err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { .. } => Self::NotFound(key.to_string()),
            other => Self::Store(other.to_string()),
        }
    }
}

#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Write an object, fully replacing any prior content at `key`.
    async fn put_object(&self, key: &str, bytes: Bytes) -> Result<(), BucketError>;
    async fn get_object(&self, key: &str) -> Result<Bytes, BucketError>;
}

async fn put_impl(
    store: &dyn ObjectStore,
    key: &str,
    bytes: Bytes,
) -> Result<(), BucketError> {
    store
        .put(&Path::from(key), PutPayload::from(bytes))
        .await
        .map_err(|err| BucketError::from_store(key, err))?;
    Ok(())
}

async fn get_impl(store: &dyn ObjectStore, key: &str) -> Result<Bytes, BucketError> {
    let result = store
        .get(&Path::from(key))
        .await
        .map_err(|err| BucketError::from_store(key, err))?;
    result
        .bytes()
        .await
        .map_err(|err| BucketError::from_store(key, err))
}

#[derive(Debug)]
pub struct GcsBucketStore {
    store: GoogleCloudStorage,
}

impl GcsBucketStore {
    pub fn new(config: GcsConfig) -> Result<Self, BucketError> {
        if config.bucket.is_empty() {
            return Err(BucketError::Configuration(
                "bucket name cannot be empty".into(),
            ));
        }

        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(config.bucket.clone());

        if let Some(path) = &config.service_account_path {
            builder = builder.with_service_account_path(path);
        }

        let store = builder
            .build()
            .map_err(|err| BucketError::Configuration(err.to_string()))?;

        Ok(Self { store })
    }
}

#[async_trait]
impl BucketStore for GcsBucketStore {
    async fn put_object(&self, key: &str, bytes: Bytes) -> Result<(), BucketError> {
        put_impl(&self.store, key, bytes).await
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, BucketError> {
        get_impl(&self.store, key).await
    }
}

/// In-memory store for tests and local dry runs.
#[derive(Debug)]
pub struct MemoryBucketStore {
    store: InMemory,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self {
            store: InMemory::new(),
        }
    }
}

impl Default for MemoryBucketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn put_object(&self, key: &str, bytes: Bytes) -> Result<(), BucketError> {
        put_impl(&self.store, key, bytes).await
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, BucketError> {
        get_impl(&self.store, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_and_overwrites() {
        let store = MemoryBucketStore::new();
        store
            .put_object("raw_data/categories.csv", Bytes::from_static(b"first"))
            .await
            .expect("put");
        store
            .put_object("raw_data/categories.csv", Bytes::from_static(b"second"))
            .await
            .expect("overwrite");

        let read = store.get_object("raw_data/categories.csv").await.expect("get");
        assert_eq!(read.as_ref(), b"second");
    }

    #[tokio::test]
    async fn missing_object_maps_to_not_found() {
        let store = MemoryBucketStore::new();
        let err = store.get_object("raw_data/sales.csv").await.unwrap_err();
        assert!(matches!(err, BucketError::NotFound(_)));
    }

    #[test]
    fn gcs_store_rejects_empty_bucket_name() {
        let err = GcsBucketStore::new(GcsConfig::default()).unwrap_err();
        assert!(matches!(err, BucketError::Configuration(_)));
    }
}
