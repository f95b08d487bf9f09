//! Ledger record shapes.
//!
//! Both records are append-only documents. Fields not known at write time
//! (early failures, missing locators) serialize as absent rather than
//! failing the write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thumbnail geometry recorded alongside a processed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailDimensions {
    pub width: u32,
    pub height: u32,
}

/// Metadata describing one successfully processed object.
///
/// Written only after the thumbnail has been durably stored. Consumers read
/// these ordered by `timestamp` descending and treat the presence of
/// `thumbnail_url` as the processing-status signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRecord {
    pub file_name: String,
    pub original_path: String,
    pub thumbnail_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Placeholder until uploads carry an authenticated principal.
    pub uploaded_by: String,
    pub status: String,
    pub dimensions: ThumbnailDimensions,
    pub timestamp: DateTime<Utc>,
}

/// Metadata describing one failed invocation that got far enough to report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}
