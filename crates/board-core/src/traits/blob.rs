//! Blob store port
//!
//! Images are persisted outside the entity store. Entities keep only the opaque
//! reference string returned by [`BlobStore::save`].

use async_trait::async_trait;

use crate::error::BlobError;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under `namespace` and return the reference to store.
    ///
    /// `extension` is taken from the uploaded file name, without the dot.
    async fn save(&self, namespace: &str, bytes: &[u8], extension: Option<&str>) -> BlobResult<String>;

    /// Read the bytes behind a reference
    async fn load(&self, reference: &str) -> BlobResult<Vec<u8>>;

    /// Remove the blob behind a reference. Missing blobs are not an error.
    async fn delete(&self, reference: &str) -> BlobResult<()>;
}
