#![warn(missing_docs)]
//! # mealscan-preview
//!
//! ## Purpose
//! Produces and owns the local preview resource shown for a selected image.
//!
//! ## Responsibilities
//! - Decode the selected image and downscale it to preview bounds.
//! - Re-encode the preview as a JPEG `data:` URI for display surfaces.
//! - Track the single active preview handle and enforce explicit revocation
//!   whenever a preview is replaced or discarded.
//!
//! ## Data flow
//! Selected image bytes -> [`generate_preview`] -> [`PreviewImage`] installed
//! into a [`PreviewRegistry`] -> display surface renders the active data URI.
//!
//! ## Ownership and lifetimes
//! The registry is the only owner of live preview buffers. Installing or
//! revoking drops the previous buffer immediately, so no stale preview can
//! outlive its handle.
//!
//! ## Error model
//! Decode and encode failures are reported as [`PreviewError`] values.
//!
//! ## Security and privacy notes
//! Previews exist only in memory; nothing is written to disk.

use base64::Engine as _;
use mealscan_core::SelectedImage;
use thiserror::Error;

/// Maximum preview width in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 300;

/// Maximum preview height in pixels.
pub const PREVIEW_MAX_HEIGHT: u32 = 170;

/// JPEG quality used for preview re-encoding.
pub const PREVIEW_JPEG_QUALITY: u8 = 80;

/// Downscaled preview ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// Preview width in pixels.
    pub width: u32,
    /// Preview height in pixels.
    pub height: u32,
    /// `data:image/jpeg;base64,...` URI for the display surface.
    pub data_uri: String,
}

/// Generates a bounded preview from selected image bytes.
///
/// # Errors
/// Returns [`PreviewError::Decode`] when the bytes are not a decodable
/// image.
/// Returns [`PreviewError::Encode`] when JPEG re-encoding fails.
pub fn generate_preview(image: &SelectedImage) -> Result<PreviewImage, PreviewError> {
    let decoded = image::load_from_memory(&image.bytes)
        .map_err(PreviewError::Decode)?
        .to_rgb8();

    let source_width = decoded.width();
    let source_height = decoded.height();
    let x_scale = PREVIEW_MAX_WIDTH as f32 / source_width.max(1) as f32;
    let y_scale = PREVIEW_MAX_HEIGHT as f32 / source_height.max(1) as f32;
    let scale = x_scale.min(y_scale).min(1.0).max(0.001);
    let target_width = (source_width as f32 * scale).round().max(1.0) as u32;
    let target_height = (source_height as f32 * scale).round().max(1.0) as u32;

    let preview = image::imageops::resize(
        &decoded,
        target_width,
        target_height,
        image::imageops::FilterType::Triangle,
    );

    let mut jpeg_bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, PREVIEW_JPEG_QUALITY)
        .encode(
            preview.as_raw(),
            target_width,
            target_height,
            image::ColorType::Rgb8.into(),
        )
        .map_err(PreviewError::Encode)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&jpeg_bytes);

    Ok(PreviewImage {
        width: target_width,
        height: target_height,
        data_uri: format!("data:image/jpeg;base64,{encoded}"),
    })
}

/// Opaque handle identifying one installed preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewHandle(u64);

/// Single-slot owner of the active preview resource.
///
/// Installing a new preview revokes the previous one; revocation counts are
/// observable so callers can verify the no-leak discipline.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    active: Option<(PreviewHandle, PreviewImage)>,
    revoked: u64,
}

impl PreviewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a preview, revoking any previously active one.
    pub fn install(&mut self, preview: PreviewImage) -> PreviewHandle {
        if self.active.take().is_some() {
            self.revoked += 1;
        }

        self.next_id += 1;
        let handle = PreviewHandle(self.next_id);
        self.active = Some((handle, preview));
        handle
    }

    /// Revokes the active preview, if any.
    ///
    /// # Returns
    /// `true` when a preview was actually discarded.
    pub fn revoke_active(&mut self) -> bool {
        if self.active.take().is_some() {
            self.revoked += 1;
            return true;
        }

        false
    }

    /// Returns the active preview when `handle` still owns the slot.
    pub fn active_preview(&self, handle: PreviewHandle) -> Option<&PreviewImage> {
        match &self.active {
            Some((active_handle, preview)) if *active_handle == handle => Some(preview),
            _ => None,
        }
    }

    /// Returns `true` when any preview is currently installed.
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns how many previews have been revoked so far.
    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }
}

/// Preview layer error type.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Selected bytes could not be decoded as an image.
    #[error("preview decode failure: {0}")]
    Decode(image::ImageError),
    /// Preview JPEG re-encoding failed.
    #[error("preview encode failure: {0}")]
    Encode(image::ImageError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for preview generation and handle revocation.

    use mealscan_core::SelectedImage;

    use super::*;

    fn fixture_png(width: u32, height: u32) -> SelectedImage {
        let pixels = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        });
        let mut bytes = Vec::new();
        pixels
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .expect("fixture png should encode");

        SelectedImage::new("fixture.png", "image/png", bytes).expect("fixture should be valid")
    }

    #[test]
    fn preview_fits_bounds_and_is_a_jpeg_data_uri() {
        let preview = generate_preview(&fixture_png(900, 340)).expect("preview should generate");

        assert!(preview.width <= PREVIEW_MAX_WIDTH);
        assert!(preview.height <= PREVIEW_MAX_HEIGHT);
        assert!(preview.data_uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let preview = generate_preview(&fixture_png(12, 9)).expect("preview should generate");
        assert_eq!(preview.width, 12);
        assert_eq!(preview.height, 9);
    }

    #[test]
    fn installing_a_new_preview_revokes_the_previous_handle() {
        let mut registry = PreviewRegistry::new();
        let first = registry.install(PreviewImage {
            width: 1,
            height: 1,
            data_uri: "data:image/jpeg;base64,a".to_string(),
        });
        let second = registry.install(PreviewImage {
            width: 2,
            height: 2,
            data_uri: "data:image/jpeg;base64,b".to_string(),
        });

        assert!(registry.active_preview(first).is_none());
        assert!(registry.active_preview(second).is_some());
        assert_eq!(registry.revoked_count(), 1);

        assert!(registry.revoke_active());
        assert!(!registry.has_active());
        assert_eq!(registry.revoked_count(), 2);
        assert!(!registry.revoke_active());
    }
}
