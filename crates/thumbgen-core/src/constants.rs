//! Well-known path segments, markers, and collection names.
//!
//! These are the defaults baked into `Config::from_env`; every one of them
//! can be overridden through the environment.

/// Namespace segment under which derived thumbnails are stored.
pub const DEFAULT_THUMBNAIL_FOLDER: &str = "thumbnails";

/// File-name marker applied to every thumbnail. Doubles as the redundant
/// anti-recursion check when a thumbnail ends up outside its namespace.
pub const DEFAULT_THUMBNAIL_PREFIX: &str = "thumb_";

/// Namespace segment the uploader writes originals into.
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// Media-family prefix an eligible content type must carry.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Content type of every produced thumbnail (output encoding is fixed to JPEG).
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Status tag written into a successful processing record.
pub const STATUS_PROCESSED: &str = "PROCESSED";

/// Ledger collection that receives processing records.
pub const DEFAULT_IMAGES_COLLECTION: &str = "images";

/// Ledger collection that receives failure records.
pub const DEFAULT_ERRORS_COLLECTION: &str = "errors";
