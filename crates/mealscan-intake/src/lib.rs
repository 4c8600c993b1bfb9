#![warn(missing_docs)]
//! # mealscan-intake
//!
//! ## Purpose
//! Turns a raw file drop into one validated [`mealscan_core::SelectedImage`].
//!
//! ## Responsibilities
//! - Apply the accepted-MIME policy for dropped files.
//! - Enforce single-file selection (extra files in one drop are ignored).
//! - Provide a source abstraction for loading image files outside the drop
//!   path, with a deterministic in-memory source for tests and CI.
//!
//! ## Data flow
//! Drop surface emits [`DroppedFile`] values -> [`select_first_supported`]
//! picks the submission candidate -> the upload pipeline consumes the
//! resulting [`SelectedImage`].
//!
//! ## Ownership and lifetimes
//! Dropped files own their byte buffers; selection moves the chosen buffer
//! into the `SelectedImage` without copying.
//!
//! ## Error model
//! Empty drops, unsupported types, and source failures are reported as
//! [`IntakeError`] values.
//!
//! ## Security and privacy notes
//! Intake never persists dropped bytes; rejected files are dropped on return.

use mealscan_core::{CoreError, SelectedImage, is_supported_mime};
use thiserror::Error;

/// One file handed over by the drop surface, before acceptance checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// File name as reported by the drop source.
    pub file_name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Selects the submission candidate from one drop.
///
/// # Semantics
/// The first file with an accepted MIME type wins; every other file in the
/// same drop is ignored, matching the single-file drop policy.
///
/// # Errors
/// Returns [`IntakeError::EmptyDrop`] when `files` is empty.
/// Returns [`IntakeError::NoSupportedImage`] when no file passes the MIME
/// policy.
/// Returns [`IntakeError::Core`] when the winning file fails image
/// validation (for example zero bytes).
pub fn select_first_supported(files: Vec<DroppedFile>) -> Result<SelectedImage, IntakeError> {
    if files.is_empty() {
        return Err(IntakeError::EmptyDrop);
    }

    let considered = files.len();
    let winner = files
        .into_iter()
        .find(|file| is_supported_mime(&file.mime))
        .ok_or(IntakeError::NoSupportedImage { considered })?;

    SelectedImage::new(winner.file_name, winner.mime, winner.bytes).map_err(IntakeError::Core)
}

/// Trait implemented by concrete image file providers.
pub trait ImageSource: Send + Sync {
    /// Loads one image file by name.
    ///
    /// # Errors
    /// Returns [`IntakeError::UnknownImage`] when the name cannot be
    /// resolved by this source.
    fn load_image(&self, name: &str) -> Result<DroppedFile, IntakeError>;
}

/// Filesystem-backed image source.
///
/// # Notes
/// MIME is inferred from the file extension; unknown extensions are rejected
/// before any bytes are read.
#[derive(Debug, Clone, Default)]
pub struct FsImageSource;

impl FsImageSource {
    /// Creates a filesystem image source.
    pub fn new() -> Self {
        Self
    }
}

impl ImageSource for FsImageSource {
    fn load_image(&self, name: &str) -> Result<DroppedFile, IntakeError> {
        let mime = mime_for_file_name(name)?;
        let bytes = std::fs::read(name)
            .map_err(|error| IntakeError::Source(format!("file read failed: {error}")))?;

        Ok(DroppedFile {
            file_name: name.to_string(),
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Deterministic in-memory source for tests and CI.
#[derive(Debug, Default)]
pub struct FixtureImageSource {
    entries: Vec<DroppedFile>,
}

impl FixtureImageSource {
    /// Creates a fixture source seeded with the provided files.
    pub fn with_files(entries: Vec<DroppedFile>) -> Self {
        Self { entries }
    }
}

impl ImageSource for FixtureImageSource {
    fn load_image(&self, name: &str) -> Result<DroppedFile, IntakeError> {
        self.entries
            .iter()
            .find(|entry| entry.file_name == name)
            .cloned()
            .ok_or_else(|| IntakeError::UnknownImage(name.to_string()))
    }
}

/// Infers an accepted MIME type from a file name extension.
///
/// # Errors
/// Returns [`IntakeError::UnknownImage`] for extensions outside the accepted
/// set (`jpg`, `jpeg`, `png`, `gif`).
pub fn mime_for_file_name(name: &str) -> Result<&'static str, IntakeError> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "gif" => Ok("image/gif"),
        _ => Err(IntakeError::UnknownImage(name.to_string())),
    }
}

/// Intake layer error type.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Drop contained no files.
    #[error("drop contained no files")]
    EmptyDrop,
    /// Drop contained files, but none with an accepted image type.
    #[error("no supported image among {considered} dropped files")]
    NoSupportedImage {
        /// Number of files considered in the drop.
        considered: usize,
    },
    /// Image name could not be resolved by the source.
    #[error("unknown image: {0}")]
    UnknownImage(String),
    /// Source runtime failure.
    #[error("image source failure: {0}")]
    Source(String),
    /// Winning file failed core image validation.
    #[error("selected file rejected: {0}")]
    Core(CoreError),
}
