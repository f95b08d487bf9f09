//! Domain value types shared across the pipeline.

pub mod descriptor;
pub mod record;

pub use descriptor::{DerivativeDescriptor, ObjectDescriptor};
pub use record::{FailureRecord, ProcessingRecord, ThumbnailDimensions};
