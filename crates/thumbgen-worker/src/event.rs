//! Platform event envelope.
//!
//! The delivery platform invokes the worker with a JSON description of the
//! finalized object. Only the fields the pipeline needs are modeled here;
//! everything else in the envelope is ignored. The envelope is converted to
//! an [`ObjectDescriptor`] at the boundary so the pipeline never sees the
//! wire shape.

use serde::Deserialize;
use thumbgen_core::ObjectDescriptor;

/// "Object finalized" notification payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectEvent {
    /// Full object key.
    pub name: String,
    /// Bucket the object was finalized in.
    pub bucket: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes; the platform reports this as a decimal string.
    #[serde(default)]
    pub size: Option<String>,
}

impl StorageObjectEvent {
    pub fn into_descriptor(self) -> ObjectDescriptor {
        ObjectDescriptor {
            bucket: self.bucket,
            path: self.name,
            content_type: self.content_type,
            size: self.size.and_then(|s| s.parse().ok()),
        }
    }
}
