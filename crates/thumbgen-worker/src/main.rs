//! Event entry point.
//!
//! The platform invokes this binary once per finalized object, passing the
//! event envelope as the first argument or on stdin. A non-zero exit status
//! is the signal for the platform's at-least-once redelivery to retry.

mod event;
mod telemetry;

use anyhow::Context;
use event::StorageObjectEvent;
use std::sync::Arc;
use thumbgen_core::Config;
use thumbgen_ledger::{Ledger, PostgresDocumentStore};
use thumbgen_processing::{ProcessOutcome, ThumbnailPipeline};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    let config = Arc::new(Config::from_env()?);

    let raw_event = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read event from stdin")?;
            buffer
        }
    };

    let event: StorageObjectEvent =
        serde_json::from_str(&raw_event).context("Failed to parse object event")?;
    let descriptor = event.into_descriptor();

    let storage = thumbgen_storage::create_storage(&config)
        .await
        .context("Failed to create storage backend")?;

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the ledger")?;
    let documents = Arc::new(
        PostgresDocumentStore::connect(database_url)
            .await
            .context("Failed to connect to ledger database")?,
    );
    let ledger = Ledger::new(
        documents,
        config.images_collection.clone(),
        config.errors_collection.clone(),
    );

    let pipeline = ThumbnailPipeline::new(storage, ledger, config);

    match pipeline.process(&descriptor).await? {
        ProcessOutcome::Skipped(reason) => {
            tracing::info!(path = %descriptor.path, reason = %reason, "Nothing to do");
        }
        ProcessOutcome::Processed {
            original_path,
            thumbnail_path,
        } => {
            tracing::info!(
                original = %original_path,
                thumbnail = %thumbnail_path,
                "Thumbnail generated"
            );
        }
    }

    Ok(())
}
