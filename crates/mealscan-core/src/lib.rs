#![warn(missing_docs)]
//! # mealscan-core
//!
//! ## Purpose
//! Defines the pure data model used across the `mealscan` workspace.
//!
//! ## Responsibilities
//! - Represent a locally-held selected image awaiting upload.
//! - Represent nutrition estimates returned for a scanned food photo.
//! - Validate scan-result invariants (confidence range, nutrient bounds).
//! - Encode/decode scan results for transport and history records.
//!
//! ## Data flow
//! Intake code emits [`SelectedImage`] values into the upload pipeline.
//! The scan contract layer produces [`ScanResult`] values that the UI and
//! history layers consume.
//!
//! ## Ownership and lifetimes
//! Images and results own their backing buffers (`Vec<u8>`, `String`) to
//! avoid hidden borrow/lifetime coupling between pipeline stages.
//!
//! ## Error model
//! Validation failures (unsupported MIME, out-of-range confidence, negative
//! nutrients) return [`CoreError`] variants with caller-actionable
//! categorization.
//!
//! ## Security and privacy notes
//! This crate never logs raw image bytes. File names are treated as opaque
//! display values and are never parsed for path components.
//!
//! ## Example
//! ```rust
//! use mealscan_core::{NutritionFacts, ScanResult};
//!
//! let nutrition = NutritionFacts::new(295.0, 17.0, 30.0, 12.0, "100g").unwrap();
//! let result = ScanResult::new("Burger", 87.0, nutrition).unwrap();
//! assert_eq!(result.confidence_percent, 87.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME types accepted for scan submission.
pub const SUPPORTED_IMAGE_MIME: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Serving size reported when the nutrition source omits one.
pub const DEFAULT_SERVING_SIZE: &str = "100g";

/// Returns `true` when `mime` is accepted for scan submission.
pub fn is_supported_mime(mime: &str) -> bool {
    SUPPORTED_IMAGE_MIME
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime.trim()))
}

/// One locally-held image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Original file name as reported by the drop source.
    pub file_name: String,
    /// Declared MIME type of the image bytes.
    pub mime: String,
    /// Raw encoded image bytes.
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    /// Constructs a validated selected image.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedMime`] when `mime` is not in
    /// [`SUPPORTED_IMAGE_MIME`].
    /// Returns [`CoreError::EmptyImage`] when `bytes` is empty.
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let mime = mime.into();
        if !is_supported_mime(&mime) {
            return Err(CoreError::UnsupportedMime { mime });
        }
        if bytes.is_empty() {
            return Err(CoreError::EmptyImage);
        }

        Ok(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }

    /// Returns image size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the image holds no bytes.
    ///
    /// Validated construction makes this unreachable in practice; the method
    /// exists for callers holding test-built values.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Nutrition estimate for one identified food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy in kilocalories per serving.
    pub calories: f32,
    /// Protein grams per serving.
    pub proteins: f32,
    /// Carbohydrate grams per serving.
    pub carbs: f32,
    /// Fat grams per serving.
    pub fats: f32,
    /// Human-readable serving size (for example `100g`).
    pub serving_size: String,
}

impl NutritionFacts {
    /// Constructs validated nutrition facts.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidNutrient`] when any value is negative or
    /// non-finite.
    pub fn new(
        calories: f32,
        proteins: f32,
        carbs: f32,
        fats: f32,
        serving_size: impl Into<String>,
    ) -> Result<Self, CoreError> {
        for (name, value) in [
            ("calories", calories),
            ("proteins", proteins),
            ("carbs", carbs),
            ("fats", fats),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidNutrient {
                    name: name.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            calories,
            proteins,
            carbs,
            fats,
            serving_size: serving_size.into(),
        })
    }
}

/// Structured nutrition estimate for one successfully scanned image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Identified food label (for example `Burger`).
    pub food_label: String,
    /// Classifier confidence scaled to percent, always within `[0, 100]`.
    pub confidence_percent: f32,
    /// Nutrition estimate for the identified food.
    pub nutrition: NutritionFacts,
}

impl ScanResult {
    /// Constructs a validated scan result.
    ///
    /// # Errors
    /// Returns [`CoreError::BlankFoodLabel`] when `food_label` is blank.
    /// Returns [`CoreError::ConfidenceOutOfRange`] when `confidence_percent`
    /// is outside `[0, 100]` or non-finite.
    pub fn new(
        food_label: impl Into<String>,
        confidence_percent: f32,
        nutrition: NutritionFacts,
    ) -> Result<Self, CoreError> {
        let food_label = food_label.into();
        if food_label.trim().is_empty() {
            return Err(CoreError::BlankFoodLabel);
        }
        if !confidence_percent.is_finite() || !(0.0..=100.0).contains(&confidence_percent) {
            return Err(CoreError::ConfidenceOutOfRange {
                value: confidence_percent,
            });
        }

        Ok(Self {
            food_label,
            confidence_percent,
            nutrition,
        })
    }

    /// Serializes the result to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }

    /// Deserializes a result from JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON decoding fails.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(raw).map_err(CoreError::Codec)
    }
}

/// Error type for core domain validation and codec failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Image MIME type is not accepted for scanning.
    #[error("unsupported image type: {mime}")]
    UnsupportedMime {
        /// Declared MIME type that was rejected.
        mime: String,
    },
    /// Selected image holds no bytes.
    #[error("selected image is empty")]
    EmptyImage,
    /// Food label cannot be blank.
    #[error("food label is blank")]
    BlankFoodLabel,
    /// Confidence percent must lie within `[0, 100]`.
    #[error("confidence percent {value} is outside [0, 100]")]
    ConfidenceOutOfRange {
        /// Rejected confidence value.
        value: f32,
    },
    /// Nutrient values must be finite and non-negative.
    #[error("nutrient {name} has invalid value {value}")]
    InvalidNutrient {
        /// Nutrient field name.
        name: String,
        /// Rejected nutrient value.
        value: f32,
    },
    /// JSON encoding/decoding error.
    #[error("scan result codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
