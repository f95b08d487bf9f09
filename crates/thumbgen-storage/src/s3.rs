//! S3-compatible storage backend built on `object_store`.

use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::time::Duration;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `region` - Region identifier
    /// * `endpoint_url` - Optional custom endpoint for S3-compatible providers
    ///   (e.g. "http://localhost:9000" for MinIO)
    ///
    /// Credentials are resolved from the environment by `AmazonS3Builder`.
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage { store, bucket })
    }

    fn location(key: &str) -> StorageResult<Path> {
        validate_key(key)?;
        Ok(Path::from(key))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        let location = Self::location(key)?;
        let start = std::time::Instant::now();

        let result = self.store.get(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => StorageError::DownloadFailed(other.to_string()),
        })?;

        let data = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(data.to_vec())
    }

    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        let location = Self::location(key)?;
        let size = data.len();
        let bytes = Bytes::from(data);

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        // Presigning is the read path; the canonical URL is enough here.
        Ok(format!("s3://{}/{}", self.bucket, key))
    }

    async fn get_read_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Self::location(key)?;

        let url = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await
            .map_err(|e| StorageError::BackendError(format!("Failed to presign URL: {}", e)))?;

        Ok(url.to_string())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let location = Self::location(key)?;

        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }
}
