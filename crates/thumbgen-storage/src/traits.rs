//! Storage abstraction trait
//!
//! This module defines the Storage trait that all blob-store backends must
//! implement.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The pipeline works against this trait so it stays decoupled from the
/// concrete backend. All operations address objects by their full key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object's bytes. Fails with `NotFound` for missing keys.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Upload bytes to a key, tagging the object with `content_type`.
    /// Overwrites any existing object at the same key and returns the
    /// object's public URL.
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Produce a durable read locator (presigned or public URL) for an
    /// object, valid for at least `expires_in`.
    async fn get_read_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Check whether an object exists at the key.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Reject keys that could escape the backend's namespace.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_string()));
    }
    if key.starts_with('/') || key.split('/').any(|seg| seg == "..") {
        return Err(StorageError::InvalidKey(format!(
            "key contains invalid path components: {}",
            key
        )));
    }
    Ok(())
}
