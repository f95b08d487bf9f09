//! Transform primitive: staged file in, encoded thumbnail file out.
//!
//! Pure with respect to storage and persistence: reads `input`, never
//! modifies it, and creates exactly one file at `output`.

use crate::resize::ImageResize;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageError, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use thumbgen_core::ThumbnailConfig;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[source] ImageError),

    #[error("Failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the transform produced: actual output geometry and encoded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOutput {
    pub width: u32,
    pub height: u32,
    pub byte_len: u64,
}

/// The resize/re-encode primitive.
pub struct Transformer;

impl Transformer {
    /// Decode the staged input, resize per the configured fit strategy with
    /// center positioning, and encode as JPEG at the configured quality.
    ///
    /// Synchronous and CPU-bound; call through `spawn_blocking` from async
    /// contexts.
    pub fn transform(
        input: &Path,
        output: &Path,
        config: &ThumbnailConfig,
    ) -> Result<TransformOutput, TransformError> {
        let data = std::fs::read(input).map_err(|e| TransformError::ReadInput {
            path: input.to_path_buf(),
            source: e,
        })?;

        let img = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(ImageError::IoError(e)))?
            .decode()
            .map_err(TransformError::Decode)?;

        let resized = ImageResize::apply_fit(&img, config.width, config.height, config.fit);
        let (out_width, out_height) = resized.dimensions();

        // JPEG carries no alpha channel; flatten before encoding.
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), config.quality);
        rgb.write_with_encoder(encoder)
            .map_err(TransformError::Encode)?;

        std::fs::write(output, &buffer).map_err(|e| TransformError::WriteOutput {
            path: output.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            width = out_width,
            height = out_height,
            byte_len = buffer.len(),
            "Thumbnail encoded"
        );

        Ok(TransformOutput {
            width: out_width,
            height: out_height,
            byte_len: buffer.len() as u64,
        })
    }
}
