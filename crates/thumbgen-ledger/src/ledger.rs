//! Record-shaped operations over a document store.

use crate::traits::{DocumentStore, LedgerResult};
use std::sync::Arc;
use thumbgen_core::models::{FailureRecord, ProcessingRecord};
use uuid::Uuid;

/// The two append-only writes the pipeline performs.
///
/// Both operations serialize the record and append it to the configured
/// collection. Optional record fields serialize as absent, so a write with
/// partial context (early failures) never fails for missing data.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn DocumentStore>,
    images_collection: String,
    errors_collection: String,
}

impl Ledger {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        images_collection: impl Into<String>,
        errors_collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            images_collection: images_collection.into(),
            errors_collection: errors_collection.into(),
        }
    }

    /// Append a processing record. Call only after the thumbnail upload has
    /// completed; readers must never observe a record whose thumbnail is not
    /// durably stored.
    pub async fn record_success(&self, record: &ProcessingRecord) -> LedgerResult<Uuid> {
        let document = serde_json::to_value(record)?;
        let id = self.store.append(&self.images_collection, document).await?;

        tracing::info!(
            document_id = %id,
            file_name = %record.file_name,
            thumbnail_path = %record.thumbnail_path,
            "Processing record appended"
        );

        Ok(id)
    }

    /// Append a failure record.
    ///
    /// Callers reporting a primary error must not let a failure here replace
    /// it; log and keep the original.
    pub async fn record_failure(&self, record: &FailureRecord) -> LedgerResult<Uuid> {
        let document = serde_json::to_value(record)?;
        let id = self.store.append(&self.errors_collection, document).await?;

        tracing::info!(
            document_id = %id,
            file_path = ?record.file_path,
            error = %record.error,
            "Failure record appended"
        );

        Ok(id)
    }
}
