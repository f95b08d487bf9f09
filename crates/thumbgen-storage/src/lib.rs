//! Thumbgen Storage Library
//!
//! Blob-store abstraction and implementations. The pipeline talks to the
//! [`Storage`] trait only; backends exist for S3-compatible object stores
//! and the local filesystem.
//!
//! # Object keys
//!
//! Keys are slash-delimited strings (`uploads/42_cat.png`). They must not
//! contain `..` or a leading `/`; backends reject such keys instead of
//! resolving them.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use thumbgen_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
