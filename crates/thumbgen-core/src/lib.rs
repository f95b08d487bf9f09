//! Thumbgen Core Library
//!
//! This crate provides the domain models, configuration, and constants
//! shared across all thumbgen components. It performs no I/O.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, FitMode, ThumbnailConfig};
pub use models::{
    DerivativeDescriptor, FailureRecord, ObjectDescriptor, ProcessingRecord, ThumbnailDimensions,
};
pub use storage_types::StorageBackend;
