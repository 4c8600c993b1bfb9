#![warn(missing_docs)]
//! # mealscan-upload
//!
//! ## Purpose
//! Implements the scan upload request path and failure classification for
//! `mealscan`.
//!
//! ## Responsibilities
//! - Validate scan endpoint policy (`/api/scan`, http/https).
//! - Encode one selected image as a `multipart/form-data` request body.
//! - Execute requests through an injectable transport abstraction with a
//!   fixed 30 second response bound.
//! - Classify unsuccessful outcomes into user-facing failure categories.
//!
//! ## Data flow
//! Selected image -> [`ScanClient::submit_image`] builds a [`ScanRequest`]
//! -> [`ScanTransport`] performs the round trip -> success bodies flow to
//! the contract layer, failures flow through [`classify_scan_failure`].
//!
//! ## Ownership and lifetimes
//! Request bodies own their buffers; nothing borrows from the selected
//! image after encoding, so callers may release it independently.
//!
//! ## Error model
//! Endpoint policy violations, connection failures, the timeout bound, and
//! non-success statuses are surfaced as [`UploadError`] values. Every value
//! classifies to exactly one [`FailureCategory`]; no upload failure escapes
//! the category table.
//!
//! ## Security and privacy notes
//! This crate never logs raw image bytes; correlation uses the content
//! fingerprint only.

use std::sync::Arc;
use std::time::Duration;

use mealscan_core::SelectedImage;
use mealscan_scan_contract::parse_error_detail;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Required scan path suffix for v1.
pub const REQUIRED_SCAN_PATH: &str = "/api/scan";

/// Upper bound on how long the client waits for a scan response.
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart field name carrying the image bytes.
pub const SCAN_FILE_FIELD: &str = "file";

/// Message shown when no response was received at all.
pub const MSG_SERVICE_UNREACHABLE: &str =
    "Cannot connect to server. Please make sure the backend is running.";

/// Message shown when the backend reports its models are unavailable.
pub const MSG_MODEL_UNAVAILABLE: &str =
    "AI models are not available. Please check server configuration.";

/// Message shown for backend-internal failures.
pub const MSG_SERVER_ERROR: &str = "Server error occurred. Please try again later.";

/// Fallback message for unclassifiable failures.
pub const MSG_UNKNOWN_ERROR: &str = "Error processing image";

/// Detail substituted when a validation response omits its own.
pub const DEFAULT_INVALID_IMAGE_DETAIL: &str =
    "Invalid image file. Please try a different image.";

/// One prepared scan request ready for a transport round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Full scan endpoint URL.
    pub url: String,
    /// `multipart/form-data` content type including the boundary.
    pub content_type: String,
    /// Encoded multipart body bytes.
    pub body: Vec<u8>,
    /// Response deadline the transport must enforce.
    pub timeout: Duration,
}

/// Raw HTTP response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl ScanHttpResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the scan client.
///
/// Implementations must surface missing responses as
/// [`UploadError::ConnectionFailed`] and deadline expiry as
/// [`UploadError::Timeout`]; every received response is returned as-is
/// regardless of status.
pub trait ScanTransport: Send + Sync {
    /// Performs one request/response round trip.
    fn send(&self, request: &ScanRequest) -> Result<ScanHttpResponse, UploadError>;
}

/// Scan client that validates endpoint policy and executes uploads.
#[derive(Clone)]
pub struct ScanClient {
    endpoint: String,
    transport: Arc<dyn ScanTransport>,
}

impl ScanClient {
    /// Creates a validated scan client.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] when the URL scheme is not
    /// http/https or the path does not end with `/api/scan`.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn ScanTransport>,
    ) -> Result<Self, UploadError> {
        let endpoint = endpoint.into();
        validate_scan_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Uploads one selected image and returns the successful response.
    ///
    /// # Errors
    /// Returns [`UploadError::ConnectionFailed`] / [`UploadError::Timeout`]
    /// when no response arrived within the bound.
    /// Returns [`UploadError::Status`] for any non-2xx response, carrying
    /// the optional `detail` extracted from the body.
    pub fn submit_image(&self, image: &SelectedImage) -> Result<ScanHttpResponse, UploadError> {
        let request = build_scan_request(&self.endpoint, image);
        let response = self.transport.send(&request)?;

        if response.is_success() {
            return Ok(response);
        }

        Err(UploadError::Status {
            status: response.status,
            detail: parse_error_detail(&response.body),
        })
    }

    /// Returns the configured scan endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Validates v1 scan endpoint constraints.
///
/// # Errors
/// Returns [`UploadError::InvalidEndpoint`] for unsupported schemes or path
/// mismatch.
pub fn validate_scan_endpoint(endpoint: &str) -> Result<(), UploadError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid scan url: {error}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UploadError::InvalidEndpoint(
            "scan endpoint must use http or https".to_string(),
        ));
    }

    if !parsed.path().ends_with(REQUIRED_SCAN_PATH) {
        return Err(UploadError::InvalidEndpoint(format!(
            "scan endpoint path must end with {REQUIRED_SCAN_PATH}"
        )));
    }

    Ok(())
}

/// Builds the multipart scan request for one selected image.
pub fn build_scan_request(endpoint: &str, image: &SelectedImage) -> ScanRequest {
    let boundary = boundary_for_image(image);
    let body = encode_multipart_body(image, &boundary);

    ScanRequest {
        url: endpoint.to_string(),
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
        timeout: SCAN_TIMEOUT,
    }
}

/// Computes a stable hex fingerprint over the image content.
///
/// The fingerprint keys log correlation and history dedup; identical bytes
/// always produce identical fingerprints.
pub fn fingerprint_for_image(image: &SelectedImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(&image.bytes);
    hex::encode(hasher.finalize())
}

fn boundary_for_image(image: &SelectedImage) -> String {
    // Invariant:
    // - The boundary delimiter must not occur inside the part body; a
    //   content-hash-derived token satisfies this without a randomness
    //   source.
    let fingerprint = fingerprint_for_image(image);
    format!("mealscan-{}", &fingerprint[..24])
}

fn encode_multipart_body(image: &SelectedImage, boundary: &str) -> Vec<u8> {
    let header = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{SCAN_FILE_FIELD}\"; \
         filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        image.file_name, image.mime
    );
    let trailer = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(header.len() + image.bytes.len() + trailer.len());
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(&image.bytes);
    body.extend_from_slice(trailer.as_bytes());
    body
}

/// Coarse classification of an unsuccessful scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// No response was received from the backend.
    ServiceUnreachable,
    /// Backend reported its models unavailable (503).
    ModelUnavailable,
    /// Validation rejected the image as non-food.
    NotFood,
    /// Validation rejected the image dimensions.
    BadImageSize,
    /// Validation rejected the image orientation.
    BadOrientation,
    /// Validation rejected the image for another reason.
    InvalidImage,
    /// Backend-internal failure (500).
    ServerError,
    /// Any other status that still carried a `detail`.
    Other,
    /// Everything that fits no other category.
    UnknownError,
}

/// Classifies one upload error into its failure category.
///
/// # Semantics
/// Precedence follows the observed backend behavior: 503, then the 400
/// validation sub-rules (matched by detail substring), then 500, then any
/// detail-carrying status, then connection-level failures.
pub fn classify_scan_failure(error: &UploadError) -> FailureCategory {
    match error {
        UploadError::ConnectionFailed(_) | UploadError::Timeout => {
            FailureCategory::ServiceUnreachable
        }
        UploadError::Status { status: 503, .. } => FailureCategory::ModelUnavailable,
        UploadError::Status {
            status: 400,
            detail,
        } => classify_validation_detail(detail.as_deref()),
        UploadError::Status { status: 500, .. } => FailureCategory::ServerError,
        UploadError::Status {
            detail: Some(_), ..
        } => FailureCategory::Other,
        UploadError::Status { detail: None, .. } | UploadError::InvalidEndpoint(_) => {
            FailureCategory::UnknownError
        }
    }
}

fn classify_validation_detail(detail: Option<&str>) -> FailureCategory {
    let Some(detail) = detail else {
        return FailureCategory::InvalidImage;
    };

    if detail.contains("food image") || detail.contains("Please upload a clear photo of food") {
        FailureCategory::NotFood
    } else if detail.contains("too small") || detail.contains("too large") {
        FailureCategory::BadImageSize
    } else if detail.contains("properly oriented") {
        FailureCategory::BadOrientation
    } else {
        FailureCategory::InvalidImage
    }
}

/// Renders the user-facing message for one upload error.
///
/// Validation categories prefix the backend detail with a pictographic
/// hint; fixed categories use the pinned message constants.
pub fn user_message(error: &UploadError) -> String {
    let detail = match error {
        UploadError::Status { detail, .. } => detail.as_deref(),
        _ => None,
    };
    let validation_detail = detail.unwrap_or(DEFAULT_INVALID_IMAGE_DETAIL);

    match classify_scan_failure(error) {
        FailureCategory::ServiceUnreachable => MSG_SERVICE_UNREACHABLE.to_string(),
        FailureCategory::ModelUnavailable => MSG_MODEL_UNAVAILABLE.to_string(),
        FailureCategory::NotFood => format!("🍽️ {validation_detail}"),
        FailureCategory::BadImageSize => format!("📏 {validation_detail}"),
        FailureCategory::BadOrientation => format!("📐 {validation_detail}"),
        FailureCategory::InvalidImage => format!("❌ {validation_detail}"),
        FailureCategory::ServerError => MSG_SERVER_ERROR.to_string(),
        FailureCategory::Other => detail.unwrap_or(MSG_UNKNOWN_ERROR).to_string(),
        FailureCategory::UnknownError => MSG_UNKNOWN_ERROR.to_string(),
    }
}

/// Errors produced by the upload client and transports.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Endpoint violates scan contract requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Connection-level failure; no response was received.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// No response arrived within the 30 second bound.
    #[error("scan request timed out")]
    Timeout,
    /// Backend answered with a non-success status.
    #[error("scan rejected with status {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Optional `detail` extracted from the error body.
        detail: Option<String>,
    },
}
