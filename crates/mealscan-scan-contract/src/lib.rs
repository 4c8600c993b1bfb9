#![warn(missing_docs)]
//! # mealscan-scan-contract
//!
//! ## Purpose
//! Defines the scan endpoint response schema and client-side mapping helpers.
//!
//! ## Responsibilities
//! - Parse scan response payloads (`food_item`, `confidence`,
//!   `nutrition_data`).
//! - Scale the raw confidence fraction to percent before it reaches the UI.
//! - Extract the optional `detail` field carried by error responses.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_scan_response`] -> [`scan_response_to_result`]
//! -> runtime UI display.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or missing mandatory fields return [`ScanContractError`].
//!
//! ## Security and privacy notes
//! This crate processes only model outputs and nutrition metadata; it never
//! touches image bytes.

use mealscan_core::{CoreError, DEFAULT_SERVING_SIZE, NutritionFacts, ScanResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nutrition block inside a scan response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPayload {
    /// Energy in kilocalories per serving.
    pub calories: f32,
    /// Protein grams per serving.
    pub proteins: f32,
    /// Carbohydrate grams per serving.
    pub carbs: f32,
    /// Fat grams per serving.
    pub fats: f32,
    /// Serving size; the backend may omit it.
    #[serde(default)]
    pub serving_size: Option<String>,
}

/// Parsed success response from the scan endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Identified food label.
    pub food_item: String,
    /// Raw classifier confidence as a fraction in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Nutrition estimate for the identified food.
    pub nutrition_data: NutritionPayload,
}

/// Error body optionally carried by 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure detail from the backend.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Parses raw JSON into a validated scan response.
///
/// # Errors
/// Returns [`ScanContractError::Decode`] for invalid JSON.
/// Returns [`ScanContractError::InvalidContract`] when mandatory fields are
/// blank or the raw confidence lies outside `[0, 1]`.
pub fn parse_scan_response(raw: &[u8]) -> Result<ScanResponse, ScanContractError> {
    let parsed: ScanResponse = serde_json::from_slice(raw).map_err(ScanContractError::Decode)?;

    if parsed.food_item.trim().is_empty() {
        return Err(ScanContractError::InvalidContract(
            "food_item is empty".to_string(),
        ));
    }

    if !parsed.confidence.is_finite() || !(0.0..=1.0).contains(&parsed.confidence) {
        return Err(ScanContractError::InvalidContract(format!(
            "confidence {} is outside [0, 1]",
            parsed.confidence
        )));
    }

    Ok(parsed)
}

/// Maps a parsed response into the client scan result.
///
/// The raw confidence fraction is scaled by 100 here, so everything past
/// this boundary deals in percent only.
///
/// # Errors
/// Returns [`ScanContractError::Core`] when the mapped values violate core
/// invariants (for example negative nutrients).
pub fn scan_response_to_result(response: &ScanResponse) -> Result<ScanResult, ScanContractError> {
    let serving_size = response
        .nutrition_data
        .serving_size
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVING_SIZE.to_string());

    let nutrition = NutritionFacts::new(
        response.nutrition_data.calories,
        response.nutrition_data.proteins,
        response.nutrition_data.carbs,
        response.nutrition_data.fats,
        serving_size,
    )
    .map_err(ScanContractError::Core)?;

    ScanResult::new(
        response.food_item.clone(),
        response.confidence * 100.0,
        nutrition,
    )
    .map_err(ScanContractError::Core)
}

/// Extracts the optional `detail` string from an error response body.
///
/// Bodies that are not JSON objects, or that omit `detail`, yield `None`;
/// error-path display never depends on a parseable body.
pub fn parse_error_detail(raw: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(raw)
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.trim().is_empty())
}

/// Scan contract errors.
#[derive(Debug, Error)]
pub enum ScanContractError {
    /// JSON decode failure.
    #[error("scan response decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("scan contract violation: {0}")]
    InvalidContract(String),
    /// Mapped values violate core model invariants.
    #[error("scan result mapping failure: {0}")]
    Core(CoreError),
}
