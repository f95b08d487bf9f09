//! Image resize operations.
//!
//! Maps the configured fit strategy onto `image` crate operations with
//! center positioning throughout.

use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};
use thumbgen_core::FitMode;

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> image::imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            image::imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        }
    }

    /// Apply a fit strategy against a target box.
    pub fn apply_fit(img: &DynamicImage, width: u32, height: u32, fit: FitMode) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);

        match fit {
            // Scale to fill the box preserving aspect ratio, center-cropping
            // the overflow.
            FitMode::Cover => img.resize_to_fill(width, height, filter),
            // Scale to fit inside the box and letterbox the remainder.
            FitMode::Contain => Self::letterbox(img, width, height),
            // Stretch to the exact box, ignoring aspect ratio.
            FitMode::Fill => img.resize_exact(width, height, filter),
            // Scale preserving aspect ratio so both dimensions fit within
            // the box; the result may be smaller than the box.
            FitMode::Inside => img.resize(width, height, filter),
            // Scale preserving aspect ratio so both dimensions are at least
            // the box; the result may be larger than the box.
            FitMode::Outside => {
                let scale_width = width as f32 / orig_width as f32;
                let scale_height = height as f32 / orig_height as f32;
                let scale = scale_width.max(scale_height);
                let scaled_width = ((orig_width as f32 * scale).round() as u32).max(1);
                let scaled_height = ((orig_height as f32 * scale).round() as u32).max(1);
                img.resize_exact(scaled_width, scaled_height, filter)
            }
        }
    }

    /// Scale to fit inside the target box and composite centered on a white
    /// background canvas of exactly the target size.
    fn letterbox(img: &DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();

        let scale_width = target_width as f32 / orig_width as f32;
        let scale_height = target_height as f32 / orig_height as f32;
        let scale = scale_width.min(scale_height);

        let scaled_width = ((orig_width as f32 * scale).round() as u32)
            .clamp(1, target_width);
        let scaled_height = ((orig_height as f32 * scale).round() as u32)
            .clamp(1, target_height);

        let bg_color = Rgba([255u8, 255u8, 255u8, 255u8]);
        let canvas_img = RgbaImage::from_pixel(target_width, target_height, bg_color);
        let mut canvas = DynamicImage::ImageRgba8(canvas_img);

        let filter = Self::select_filter(orig_width, orig_height, scaled_width, scaled_height);
        let resized = img.resize_exact(scaled_width, scaled_height, filter);

        let x_offset = (target_width - scaled_width) / 2;
        let y_offset = (target_height - scaled_height) / 2;
        imageops::overlay(&mut canvas, &resized, x_offset as i64, y_offset as i64);

        canvas
    }
}
