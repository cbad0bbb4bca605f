//! Storage adapter contract.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::ImageFile;

/// Contract between a host application and an image storage backend.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store an image and return its public delivery URL.
    async fn save(&self, file: &ImageFile) -> Result<String, StorageError>;

    /// Check whether an asset with this filename already exists.
    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Delete an asset by filename.
    async fn delete(&self, filename: &str) -> Result<(), StorageError>;

    /// Fetch the raw bytes of a previously stored asset.
    async fn read(&self, url: &str) -> Result<Vec<u8>, StorageError>;
}
