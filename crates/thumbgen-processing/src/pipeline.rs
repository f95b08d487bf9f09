//! Pipeline orchestrator.
//!
//! Sequences guard → fetch → transform → store → record → cleanup for one
//! object descriptor. The thumbnail upload always happens-before the
//! processing record naming it; a ledger reader must never observe a record
//! whose thumbnail is not durably stored.

use crate::guard::{self, SkipReason};
use crate::paths;
use crate::scratch::ScratchArea;
use crate::transformer::{TransformError, Transformer};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use thumbgen_core::constants::{STATUS_PROCESSED, THUMBNAIL_CONTENT_TYPE};
use thumbgen_core::models::{FailureRecord, ProcessingRecord, ThumbnailDimensions};
use thumbgen_core::{Config, DerivativeDescriptor, ObjectDescriptor};
use thumbgen_ledger::{Ledger, LedgerError};
use thumbgen_storage::{Storage, StorageError};

/// Errors from a pipeline run that got past the eligibility guard.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(#[source] StorageError),

    #[error("Transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("Store failed: {0}")]
    Store(#[source] StorageError),

    #[error("Locator generation failed: {0}")]
    Locator(#[source] StorageError),

    #[error("Ledger write failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Scratch staging failed: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("Transform task aborted: {0}")]
    TaskAborted(String),
}

/// Tri-state result of `process`: ineligible inputs are a deliberate no-op,
/// distinct from failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Skipped(SkipReason),
    Processed {
        original_path: String,
        thumbnail_path: String,
    },
}

/// The event-driven transform pipeline.
///
/// One instance is shared across invocations; all per-invocation state lives
/// on the stack of [`ThumbnailPipeline::process`], so concurrent invocations
/// need no coordination.
pub struct ThumbnailPipeline {
    storage: Arc<dyn Storage>,
    ledger: Ledger,
    config: Arc<Config>,
}

impl ThumbnailPipeline {
    pub fn new(storage: Arc<dyn Storage>, ledger: Ledger, config: Arc<Config>) -> Self {
        Self {
            storage,
            ledger,
            config,
        }
    }

    /// Process one finalized object.
    ///
    /// Ineligible descriptors return `Ok(Skipped)` with zero side effects.
    /// Eligible descriptors either complete fully (`Ok(Processed)`) or fail
    /// after best-effort cleanup and a best-effort failure record; the
    /// original error always propagates, never a secondary one.
    pub async fn process(
        &self,
        descriptor: &ObjectDescriptor,
    ) -> Result<ProcessOutcome, PipelineError> {
        if let Err(reason) = guard::check_eligibility(descriptor, &self.config) {
            tracing::info!(
                bucket = %descriptor.bucket,
                path = %descriptor.path,
                reason = %reason,
                "Object ineligible, skipping"
            );
            return Ok(ProcessOutcome::Skipped(reason));
        }

        tracing::info!(
            bucket = %descriptor.bucket,
            path = %descriptor.path,
            content_type = ?descriptor.content_type,
            size = ?descriptor.size,
            "Processing new object"
        );

        match self.run(descriptor).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                self.report_failure(descriptor, &error).await;
                Err(error)
            }
        }
    }

    async fn run(&self, descriptor: &ObjectDescriptor) -> Result<ProcessOutcome, PipelineError> {
        let file_name = descriptor.file_name().to_string();
        let thumbnail_key = paths::thumbnail_path(&descriptor.path, &self.config);

        // Scratch files are owned by this invocation; Drop reclaims them on
        // every error path below.
        let scratch = ScratchArea::allocate(&self.config.scratch_dir)?;
        let input = scratch.path_for(&file_name);
        let output =
            scratch.path_for(&format!("{}{}", self.config.thumbnail_prefix, file_name));

        // Fetch
        let original = self
            .storage
            .download(&descriptor.path)
            .await
            .map_err(PipelineError::Fetch)?;
        tokio::fs::write(&input, &original).await?;

        // Transform
        let thumb_config = self.config.thumbnail;
        let (task_input, task_output) = (input.clone(), output.clone());
        let produced = tokio::task::spawn_blocking(move || {
            Transformer::transform(&task_input, &task_output, &thumb_config)
        })
        .await
        .map_err(|e| PipelineError::TaskAborted(e.to_string()))??;

        // Store
        let thumbnail_bytes = tokio::fs::read(&output).await?;
        self.storage
            .upload(&thumbnail_key, thumbnail_bytes, THUMBNAIL_CONTENT_TYPE)
            .await
            .map_err(PipelineError::Store)?;

        let derivative = DerivativeDescriptor {
            path: thumbnail_key.clone(),
            content_type: THUMBNAIL_CONTENT_TYPE.to_string(),
            byte_len: produced.byte_len,
        };

        // Read locators. The thumbnail locator is part of the contract with
        // ledger consumers; the original's is best-effort.
        let expiry = Duration::from_secs(self.config.signed_url_expiry_secs);
        let thumbnail_url = self
            .storage
            .get_read_url(&derivative.path, expiry)
            .await
            .map_err(PipelineError::Locator)?;
        let original_url = match self.storage.get_read_url(&descriptor.path, expiry).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(path = %descriptor.path, error = %e, "Could not build original read URL");
                None
            }
        };

        // Record. Reaching this point means the thumbnail is durably stored;
        // a failure here leaves a stored-but-unlisted thumbnail, and the
        // platform retry overwrites the same deterministic destination.
        let record = ProcessingRecord {
            file_name: file_name.clone(),
            original_path: descriptor.path.clone(),
            thumbnail_path: derivative.path.clone(),
            original_url,
            thumbnail_url: Some(thumbnail_url),
            content_type: descriptor.content_type.clone(),
            uploaded_by: "system".to_string(),
            status: STATUS_PROCESSED.to_string(),
            dimensions: ThumbnailDimensions {
                width: produced.width,
                height: produced.height,
            },
            timestamp: Utc::now(),
        };
        self.ledger.record_success(&record).await?;

        // Cleanup
        scratch.close();

        tracing::info!(
            original = %descriptor.path,
            thumbnail = %derivative.path,
            byte_len = derivative.byte_len,
            "Processing completed"
        );

        Ok(ProcessOutcome::Processed {
            original_path: descriptor.path.clone(),
            thumbnail_path: derivative.path,
        })
    }

    /// Append a failure record with whatever context exists. A failure to
    /// write the record is logged and swallowed so it never masks the
    /// original error.
    async fn report_failure(&self, descriptor: &ObjectDescriptor, error: &PipelineError) {
        let record = FailureRecord {
            file_name: Some(descriptor.file_name().to_string()),
            file_path: Some(descriptor.path.clone()),
            error: error.to_string(),
            detail: error_chain(error),
            timestamp: Utc::now(),
        };

        if let Err(ledger_error) = self.ledger.record_failure(&record).await {
            tracing::warn!(
                error = %ledger_error,
                original_error = %error,
                path = %descriptor.path,
                "Failed to append failure record"
            );
        }
    }
}

/// Render the source chain below the top-level error, if any.
fn error_chain(error: &PipelineError) -> Option<String> {
    use std::error::Error;

    let mut parts = Vec::new();
    let mut source = error.source();
    while let Some(err) = source {
        parts.push(err.to_string());
        source = err.source();
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(": "))
    }
}
