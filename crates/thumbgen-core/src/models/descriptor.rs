//! Object descriptors at the pipeline boundary.
//!
//! `ObjectDescriptor` is the explicit value type the event entry point hands
//! to the pipeline, decoupling it from the delivery mechanism's wire shape.

use serde::{Deserialize, Serialize};

/// A finalized object in the blob store, as reported by the event source.
/// Immutable; received once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// Bucket identifier.
    pub bucket: String,
    /// Slash-delimited object key acting as a namespace path.
    pub path: String,
    /// MIME type as reported by the uploader; may be absent.
    pub content_type: Option<String>,
    /// Object size in bytes, when the event source reports it.
    pub size: Option<u64>,
}

impl ObjectDescriptor {
    /// Base name of the object key (the part after the last `/`).
    ///
    /// Keys are treated as plain slash-delimited strings, never as
    /// platform paths.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Directory portion of the object key, without the trailing `/`.
    /// Empty for keys at the bucket root.
    pub fn dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }
}

/// Description of a derived artifact after the transform step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeDescriptor {
    /// Destination key, computed deterministically from the original key.
    pub path: String,
    /// Fixed to the output encoding's MIME type.
    pub content_type: String,
    /// Encoded size in bytes.
    pub byte_len: u64,
}
