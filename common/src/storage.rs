//! Blob storage abstraction using trait-based design.
//!
//! This module provides a generic storage interface over the object_store
//! crate. The pipeline uses it for its single durable side effect: publishing
//! the cleaned output artifact. `put` replaces any existing object at the
//! target location, which is what gives the sink its overwrite semantics.

use async_trait::async_trait;
use object_store::{
    ObjectStore, PutPayload, local::LocalFileSystem, memory::InMemory, path::Path as ObjectPath,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, SiftError};

/// Generic blob store for whole-object reads and writes.
///
/// Locations are slash-separated paths relative to the store root. There is
/// no partial update: `put` atomically replaces the object as a whole.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    /// Read the full contents of an object, or `None` if it does not exist.
    async fn get(&self, location: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace the object at `location` with the given bytes.
    async fn put(&self, location: &str, bytes: &[u8]) -> Result<()>;

    /// Check whether an object exists at `location`.
    async fn exists(&self, location: &str) -> Result<bool>;

    /// Remove the object at `location`. Removing a missing object is an error.
    async fn delete(&self, location: &str) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageBackend {
    /// In-memory storage for testing and development.
    Memory,
    /// Local filesystem storage rooted at a directory.
    LocalFileSystem { root_path: String },
    /// AWS S3 storage.
    #[cfg(feature = "aws")]
    S3 { bucket: String, region: String },
    /// Azure Blob Storage.
    #[cfg(feature = "azure")]
    Azure { account: String, container: String },
    /// Google Cloud Storage.
    #[cfg(feature = "gcp")]
    Gcs { bucket: String },
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory
    }
}

/// Builder for creating blob store instances.
pub struct BlobStoreBuilder {
    backend: StorageBackend,
}

impl BlobStoreBuilder {
    /// Create a new builder with the default (in-memory) backend.
    pub fn new() -> Self {
        Self {
            backend: StorageBackend::default(),
        }
    }

    /// Set the storage backend.
    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Build a blob store with the specified configuration.
    ///
    /// For the local filesystem backend the root directory is created if it
    /// does not exist yet.
    pub fn build(self) -> Result<Arc<dyn BlobStore>> {
        let store: Arc<dyn ObjectStore> = match &self.backend {
            StorageBackend::Memory => Arc::new(InMemory::new()),
            StorageBackend::LocalFileSystem { root_path } => {
                std::fs::create_dir_all(root_path).map_err(|e| {
                    SiftError::storage_with_source(
                        format!("Failed to create storage root '{}'", root_path),
                        e,
                    )
                })?;
                let fs = LocalFileSystem::new_with_prefix(root_path).map_err(|e| {
                    SiftError::storage_with_source(
                        format!("Failed to open local filesystem storage at '{}'", root_path),
                        e,
                    )
                })?;
                Arc::new(fs)
            }
            #[cfg(feature = "aws")]
            StorageBackend::S3 { .. } => {
                return Err(SiftError::storage("S3 backend not yet implemented"));
            }
            #[cfg(feature = "azure")]
            StorageBackend::Azure { .. } => {
                return Err(SiftError::storage("Azure backend not yet implemented"));
            }
            #[cfg(feature = "gcp")]
            StorageBackend::Gcs { .. } => {
                return Err(SiftError::storage("GCS backend not yet implemented"));
            }
        };

        Ok(Arc::new(ObjectStoreBlobStore {
            store,
            backend: self.backend,
        }))
    }
}

impl Default for BlobStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Object store-backed blob store implementation.
struct ObjectStoreBlobStore {
    store: Arc<dyn ObjectStore>,
    backend: StorageBackend,
}

impl Debug for ObjectStoreBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreBlobStore")
            .field("backend", &self.backend)
            .finish()
    }
}

impl ObjectStoreBlobStore {
    fn convert_error(error: object_store::Error) -> SiftError {
        SiftError::storage_with_source("Object store operation failed", error)
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBlobStore {
    async fn get(&self, location: &str) -> Result<Option<Vec<u8>>> {
        let path = ObjectPath::from(location);

        match self.store.get(&path).await {
            Ok(get_result) => {
                let bytes = get_result.bytes().await.map_err(Self::convert_error)?;
                Ok(Some(bytes.to_vec()))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(Self::convert_error(e)),
        }
    }

    async fn put(&self, location: &str, bytes: &[u8]) -> Result<()> {
        let path = ObjectPath::from(location);
        let payload = PutPayload::from(bytes.to_vec());

        self.store
            .put(&path, payload)
            .await
            .map_err(Self::convert_error)?;
        debug!(location, bytes = bytes.len(), "object stored");
        Ok(())
    }

    async fn exists(&self, location: &str) -> Result<bool> {
        let path = ObjectPath::from(location);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Self::convert_error(e)),
        }
    }

    async fn delete(&self, location: &str) -> Result<()> {
        let path = ObjectPath::from(location);
        self.store.delete(&path).await.map_err(Self::convert_error)
    }
}
