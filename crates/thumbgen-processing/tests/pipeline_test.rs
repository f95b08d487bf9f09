//! End-to-end pipeline tests over local storage and an in-memory ledger.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Rgba, RgbaImage};
use tempfile::TempDir;
use thumbgen_core::{Config, ObjectDescriptor};
use thumbgen_ledger::{DocumentStore, Ledger, LedgerError, LedgerResult, MemoryDocumentStore};
use thumbgen_processing::{PipelineError, ProcessOutcome, SkipReason, ThumbnailPipeline};
use thumbgen_storage::{LocalStorage, Storage, StorageError, StorageResult};
use uuid::Uuid;

struct TestApp {
    _storage_dir: TempDir,
    scratch_root: TempDir,
    storage: Arc<dyn Storage>,
    documents: Arc<MemoryDocumentStore>,
    pipeline: ThumbnailPipeline,
}

async fn setup() -> TestApp {
    let storage_dir = tempfile::tempdir().unwrap();
    let scratch_root = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.scratch_dir = scratch_root.path().to_path_buf();

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap(),
    );
    let documents = Arc::new(MemoryDocumentStore::new());
    let ledger = Ledger::new(
        documents.clone(),
        config.images_collection.clone(),
        config.errors_collection.clone(),
    );
    let pipeline = ThumbnailPipeline::new(storage.clone(), ledger, Arc::new(config));

    TestApp {
        _storage_dir: storage_dir,
        scratch_root,
        storage,
        documents,
        pipeline,
    }
}

impl TestApp {
    fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch_root.path()).unwrap().count() == 0
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([200, 60, 20, 255]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn descriptor(path: &str, content_type: Option<&str>) -> ObjectDescriptor {
    ObjectDescriptor {
        bucket: "test-bucket".to_string(),
        path: path.to_string(),
        content_type: content_type.map(String::from),
        size: None,
    }
}

#[tokio::test]
async fn test_successful_run_stores_thumbnail_and_record() {
    let app = setup().await;

    app.storage
        .upload("uploads/42_cat.png", png_bytes(64, 48), "image/png")
        .await
        .unwrap();

    let outcome = app
        .pipeline
        .process(&descriptor("uploads/42_cat.png", Some("image/png")))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ProcessOutcome::Processed {
            original_path: "uploads/42_cat.png".to_string(),
            thumbnail_path: "thumbnails/thumb_42_cat.png".to_string(),
        }
    );

    // The thumbnail is durably stored as a 200x200 JPEG
    let thumb = app
        .storage
        .download("thumbnails/thumb_42_cat.png")
        .await
        .unwrap();
    let reader = ImageReader::new(Cursor::new(&thumb))
        .with_guessed_format()
        .unwrap();
    assert_eq!(reader.format(), Some(ImageFormat::Jpeg));
    assert_eq!(reader.decode().unwrap().dimensions(), (200, 200));

    // Exactly one processing record naming the derived path
    let records = app.documents.documents("images");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fileName"], "42_cat.png");
    assert_eq!(records[0]["originalPath"], "uploads/42_cat.png");
    assert_eq!(records[0]["thumbnailPath"], "thumbnails/thumb_42_cat.png");
    assert_eq!(records[0]["status"], "PROCESSED");
    assert_eq!(records[0]["contentType"], "image/png");
    assert_eq!(records[0]["dimensions"]["width"], 200);
    assert!(records[0]["thumbnailUrl"].as_str().unwrap().contains("thumb_42_cat.png"));
    assert!(app.documents.is_empty("errors"));

    // No scratch files remain
    assert!(app.scratch_is_empty());
}

#[tokio::test]
async fn test_thumbnail_object_is_skipped_with_zero_side_effects() {
    let app = setup().await;

    let outcome = app
        .pipeline
        .process(&descriptor(
            "thumbnails/thumb_42_cat.png",
            Some("image/png"),
        ))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ProcessOutcome::Skipped(SkipReason::InThumbnailFolder)
    );
    assert!(app.documents.is_empty("images"));
    assert!(app.documents.is_empty("errors"));
    assert!(app.scratch_is_empty());
}

#[tokio::test]
async fn test_non_image_is_skipped() {
    let app = setup().await;

    let outcome = app
        .pipeline
        .process(&descriptor("uploads/doc.pdf", Some("application/pdf")))
        .await
        .unwrap();

    assert_eq!(outcome, ProcessOutcome::Skipped(SkipReason::NotAnImage));
    assert!(app.documents.is_empty("images"));
    assert!(app.documents.is_empty("errors"));
}

#[tokio::test]
async fn test_fetch_failure_records_and_propagates() {
    let app = setup().await;

    // Nothing was seeded at this path
    let err = app
        .pipeline
        .process(&descriptor("uploads/missing.png", Some("image/png")))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(_)));

    let failures = app.documents.documents("errors");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["fileName"], "missing.png");
    assert_eq!(failures[0]["filePath"], "uploads/missing.png");
    assert!(failures[0]["error"].as_str().unwrap().contains("Fetch failed"));

    assert!(app.documents.is_empty("images"));
    assert!(app.scratch_is_empty());
}

#[tokio::test]
async fn test_undecodable_input_fails_transform_cleanly() {
    let app = setup().await;

    app.storage
        .upload("uploads/fake.png", b"not an image at all".to_vec(), "image/png")
        .await
        .unwrap();

    let err = app
        .pipeline
        .process(&descriptor("uploads/fake.png", Some("image/png")))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Transform(_)));

    // No thumbnail was stored, one failure record, no scratch leak
    assert!(!app.storage.exists("thumbnails/thumb_fake.png").await.unwrap());
    assert_eq!(app.documents.len("errors"), 1);
    assert!(app.documents.is_empty("images"));
    assert!(app.scratch_is_empty());
}

#[tokio::test]
async fn test_record_is_never_written_without_stored_thumbnail() {
    let app = setup().await;

    app.storage
        .upload("uploads/a.png", png_bytes(16, 16), "image/png")
        .await
        .unwrap();
    app.pipeline
        .process(&descriptor("uploads/a.png", Some("image/png")))
        .await
        .unwrap();

    // Every processing record names a thumbnail that actually exists
    for record in app.documents.documents("images") {
        let path = record["thumbnailPath"].as_str().unwrap();
        assert!(app.storage.exists(path).await.unwrap(), "dangling record for {path}");
    }
}

#[tokio::test]
async fn test_redelivery_converges_on_same_destination() {
    let app = setup().await;

    app.storage
        .upload("uploads/b.png", png_bytes(20, 20), "image/png")
        .await
        .unwrap();

    let first = app
        .pipeline
        .process(&descriptor("uploads/b.png", Some("image/png")))
        .await
        .unwrap();
    let second = app
        .pipeline
        .process(&descriptor("uploads/b.png", Some("image/png")))
        .await
        .unwrap();

    // Same deterministic destination; duplicate metadata is acceptable
    assert_eq!(first, second);
    assert_eq!(app.documents.len("images"), 2);
    assert!(app.storage.exists("thumbnails/thumb_b.png").await.unwrap());
    assert!(app.scratch_is_empty());
}

#[tokio::test]
async fn test_concurrent_same_named_objects_do_not_collide_in_scratch() {
    let app = setup().await;

    app.storage
        .upload("uploads/x/pic.png", png_bytes(12, 12), "image/png")
        .await
        .unwrap();
    app.storage
        .upload("uploads/y/pic.png", png_bytes(24, 24), "image/png")
        .await
        .unwrap();

    let desc_x = descriptor("uploads/x/pic.png", Some("image/png"));
    let desc_y = descriptor("uploads/y/pic.png", Some("image/png"));
    let (first, second) = tokio::join!(
        app.pipeline.process(&desc_x),
        app.pipeline.process(&desc_y),
    );

    assert!(matches!(first.unwrap(), ProcessOutcome::Processed { .. }));
    assert!(matches!(second.unwrap(), ProcessOutcome::Processed { .. }));
    assert_eq!(app.documents.len("images"), 2);
    assert!(app.scratch_is_empty());
}

/// Document store whose writes always fail, for the ledger error paths.
struct RejectingDocumentStore;

#[async_trait]
impl DocumentStore for RejectingDocumentStore {
    async fn append(
        &self,
        _collection: &str,
        _document: serde_json::Value,
    ) -> LedgerResult<Uuid> {
        Err(LedgerError::WriteFailed(
            "document store unavailable".to_string(),
        ))
    }
}

/// Storage that accepts objects but cannot presign read URLs.
struct NoPresignStorage(LocalStorage);

#[async_trait]
impl Storage for NoPresignStorage {
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.0.download(key).await
    }

    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        self.0.upload(key, data, content_type).await
    }

    async fn get_read_url(&self, _key: &str, _expires_in: Duration) -> StorageResult<String> {
        Err(StorageError::BackendError(
            "presigning unavailable".to_string(),
        ))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.0.exists(key).await
    }
}

#[tokio::test]
async fn test_ledger_write_failure_surfaces_after_thumbnail_is_stored() {
    let storage_dir = tempfile::tempdir().unwrap();
    let scratch_root = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.scratch_dir = scratch_root.path().to_path_buf();

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap(),
    );
    let ledger = Ledger::new(
        Arc::new(RejectingDocumentStore),
        config.images_collection.clone(),
        config.errors_collection.clone(),
    );
    let pipeline = ThumbnailPipeline::new(storage.clone(), ledger, Arc::new(config));

    storage
        .upload("uploads/c.png", png_bytes(32, 32), "image/png")
        .await
        .unwrap();

    let err = pipeline
        .process(&descriptor("uploads/c.png", Some("image/png")))
        .await
        .unwrap_err();

    // The record write failed, not the thumbnail: it stays durably stored at
    // the deterministic destination, and redelivery converges on the same key
    assert!(matches!(err, PipelineError::Ledger(_)));
    assert!(storage.exists("thumbnails/thumb_c.png").await.unwrap());
    assert_eq!(
        std::fs::read_dir(scratch_root.path()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_failing_failure_record_never_masks_fetch_error() {
    let storage_dir = tempfile::tempdir().unwrap();
    let scratch_root = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.scratch_dir = scratch_root.path().to_path_buf();

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap(),
    );
    let ledger = Ledger::new(
        Arc::new(RejectingDocumentStore),
        config.images_collection.clone(),
        config.errors_collection.clone(),
    );
    let pipeline = ThumbnailPipeline::new(storage, ledger, Arc::new(config));

    // Nothing was seeded, and the errors-collection write will fail too;
    // the fetch error must still be the one that propagates
    let err = pipeline
        .process(&descriptor("uploads/missing.png", Some("image/png")))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(_)));
    assert_eq!(
        std::fs::read_dir(scratch_root.path()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_presign_failure_is_a_locator_error_with_thumbnail_stored() {
    let storage_dir = tempfile::tempdir().unwrap();
    let scratch_root = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.scratch_dir = scratch_root.path().to_path_buf();

    let inner = LocalStorage::new(storage_dir.path(), "http://localhost:3000/media".to_string())
        .await
        .unwrap();
    let storage: Arc<dyn Storage> = Arc::new(NoPresignStorage(inner));
    let documents = Arc::new(MemoryDocumentStore::new());
    let ledger = Ledger::new(
        documents.clone(),
        config.images_collection.clone(),
        config.errors_collection.clone(),
    );
    let pipeline = ThumbnailPipeline::new(storage.clone(), ledger, Arc::new(config));

    storage
        .upload("uploads/d.png", png_bytes(16, 16), "image/png")
        .await
        .unwrap();

    let err = pipeline
        .process(&descriptor("uploads/d.png", Some("image/png")))
        .await
        .unwrap_err();

    // A failed presign is not a failed upload: the thumbnail is stored, and
    // the failure record names locator generation as the cause
    assert!(matches!(err, PipelineError::Locator(_)));
    assert!(storage.exists("thumbnails/thumb_d.png").await.unwrap());
    assert!(documents.is_empty("images"));

    let failures = documents.documents("errors");
    assert_eq!(failures.len(), 1);
    assert!(failures[0]["error"]
        .as_str()
        .unwrap()
        .contains("Locator generation failed"));
}
