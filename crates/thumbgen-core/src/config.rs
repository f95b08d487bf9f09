//! Configuration module
//!
//! Process-wide configuration, loaded once from the environment at startup
//! and passed by reference into the pipeline. No ambient global state.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ERRORS_COLLECTION, DEFAULT_IMAGES_COLLECTION, DEFAULT_THUMBNAIL_FOLDER,
    DEFAULT_THUMBNAIL_PREFIX, DEFAULT_UPLOAD_FOLDER,
};
use crate::storage_types::StorageBackend;

// Thumbnail geometry defaults
const THUMB_WIDTH: u32 = 200;
const THUMB_HEIGHT: u32 = 200;
const THUMB_QUALITY: u8 = 80;
const SIGNED_URL_EXPIRY_SECS: u64 = 7 * 24 * 3600;

/// Fit strategy for resizing, matching the usual raster-resize semantics:
/// `Cover` crops to fill the target box, `Contain` letterboxes inside it,
/// `Fill` stretches ignoring aspect ratio, `Inside`/`Outside` scale bounded
/// by one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    #[default]
    Cover,
    Contain,
    Fill,
    Inside,
    Outside,
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FitMode::Cover => "cover",
            FitMode::Contain => "contain",
            FitMode::Fill => "fill",
            FitMode::Inside => "inside",
            FitMode::Outside => "outside",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cover" => Ok(FitMode::Cover),
            "contain" => Ok(FitMode::Contain),
            "fill" => Ok(FitMode::Fill),
            "inside" => Ok(FitMode::Inside),
            "outside" => Ok(FitMode::Outside),
            other => Err(format!("Unknown fit mode: {}", other)),
        }
    }
}

/// Target geometry and encoding for produced thumbnails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub height: u32,
    pub fit: FitMode,
    /// JPEG encoding quality, 1-100.
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: THUMB_WIDTH,
            height: THUMB_HEIGHT,
            fit: FitMode::Cover,
            quality: THUMB_QUALITY,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub thumbnail: ThumbnailConfig,
    /// Namespace segment for derived thumbnails.
    pub thumbnail_folder: String,
    /// File-name marker for derived thumbnails.
    pub thumbnail_prefix: String,
    /// Namespace segment originals are uploaded into.
    pub upload_folder: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    /// Expiry for read locators handed to ledger consumers.
    pub signed_url_expiry_secs: u64,
    // Ledger configuration
    pub database_url: Option<String>,
    pub images_collection: String,
    pub errors_collection: String,
    /// Root under which per-invocation scratch directories are created.
    pub scratch_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let thumbnail = ThumbnailConfig {
            width: env::var("THUMB_WIDTH")
                .unwrap_or_else(|_| THUMB_WIDTH.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("THUMB_WIDTH must be a valid number"))?,
            height: env::var("THUMB_HEIGHT")
                .unwrap_or_else(|_| THUMB_HEIGHT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("THUMB_HEIGHT must be a valid number"))?,
            fit: env::var("THUMB_FIT")
                .unwrap_or_else(|_| "cover".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("THUMB_FIT: {}", e))?,
            quality: env::var("THUMB_QUALITY")
                .unwrap_or_else(|_| THUMB_QUALITY.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("THUMB_QUALITY must be a valid number"))?,
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let config = Config {
            thumbnail,
            thumbnail_folder: env::var("THUMBNAIL_FOLDER")
                .unwrap_or_else(|_| DEFAULT_THUMBNAIL_FOLDER.to_string()),
            thumbnail_prefix: env::var("THUMBNAIL_PREFIX")
                .unwrap_or_else(|_| DEFAULT_THUMBNAIL_PREFIX.to_string()),
            upload_folder: env::var("UPLOAD_FOLDER")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.to_string()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok().or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .unwrap_or_else(|_| SIGNED_URL_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_EXPIRY_SECS),
            database_url: env::var("DATABASE_URL").ok(),
            images_collection: env::var("LEDGER_IMAGES_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_IMAGES_COLLECTION.to_string()),
            errors_collection: env::var("LEDGER_ERRORS_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_ERRORS_COLLECTION.to_string()),
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(anyhow::anyhow!(
                "Thumbnail dimensions must be at least 1x1 (got {}x{})",
                self.thumbnail.width,
                self.thumbnail.height
            ));
        }
        if self.thumbnail.quality == 0 || self.thumbnail.quality > 100 {
            return Err(anyhow::anyhow!(
                "THUMB_QUALITY must be between 1 and 100 (got {})",
                self.thumbnail.quality
            ));
        }
        if self.thumbnail_prefix.is_empty() {
            return Err(anyhow::anyhow!("THUMBNAIL_PREFIX cannot be empty"));
        }
        if self.thumbnail_folder.is_empty() || self.thumbnail_folder.contains('/') {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_FOLDER must be a single path segment"
            ));
        }
        if self.upload_folder.is_empty() || self.upload_folder.contains('/') {
            return Err(anyhow::anyhow!("UPLOAD_FOLDER must be a single path segment"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            thumbnail: ThumbnailConfig::default(),
            thumbnail_folder: DEFAULT_THUMBNAIL_FOLDER.to_string(),
            thumbnail_prefix: DEFAULT_THUMBNAIL_PREFIX.to_string(),
            upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            signed_url_expiry_secs: SIGNED_URL_EXPIRY_SECS,
            database_url: None,
            images_collection: DEFAULT_IMAGES_COLLECTION.to_string(),
            errors_collection: DEFAULT_ERRORS_COLLECTION.to_string(),
            scratch_dir: env::temp_dir(),
        }
    }
}
