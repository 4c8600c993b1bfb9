#![warn(missing_docs)]
//! # mealscan-app
//!
//! ## Purpose
//! Orchestrates intake, preview, upload, contract mapping, and UI state for
//! `mealscan`.
//!
//! ## Responsibilities
//! - Own the upload lifecycle state machine
//!   (`Idle -> Selected -> Uploading -> Success | Failure`).
//! - Enforce the one-upload-in-flight admission policy.
//! - Convert transport outcomes into scan results or user-facing failure
//!   messages.
//! - Project lifecycle state into UI-safe status snapshots.
//!
//! ## Data flow
//! File drop -> intake selection -> preview install -> upload request ->
//! response/failure classification -> UI projection and history display.
//!
//! ## Ownership and lifetimes
//! The controller owns the preview registry and the terminal result/error
//! values; it lives for the scan view's mount lifetime and is dropped with
//! it.
//!
//! ## Error model
//! Pre-submission failures (rejected drops, undecodable previews) are
//! wrapped in [`AppError`] and leave the machine in its prior phase. Upload
//! failures never escape as errors; they land the machine in
//! [`ScanPhase::Failure`] with a classified message.
//!
//! ## Security and privacy notes
//! Log correlation uses content fingerprints; raw image bytes never reach
//! status projections or log lines.

use mealscan_core::{ScanResult, SelectedImage};
use mealscan_intake::{DroppedFile, IntakeError, select_first_supported};
use mealscan_preview::{PreviewError, PreviewHandle, PreviewRegistry, generate_preview};
use mealscan_scan_contract::{parse_scan_response, scan_response_to_result};
use mealscan_ui::UiState;
use mealscan_upload::{
    FailureCategory, MSG_UNKNOWN_ERROR, ScanClient, ScanHttpResponse, UploadError,
    classify_scan_failure, fingerprint_for_image, user_message,
};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("MEALSCAN_VERSION");

/// Default scan endpoint when no override is configured.
pub const DEFAULT_SCAN_ENDPOINT: &str = "http://localhost:8000/api/scan";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the scan endpoint from the environment.
///
/// Semantics:
/// - `MEALSCAN_SCAN_ENDPOINT` set and non-blank => its trimmed value.
/// - Otherwise => [`DEFAULT_SCAN_ENDPOINT`].
pub fn scan_endpoint_from_env() -> String {
    match std::env::var("MEALSCAN_SCAN_ENDPOINT") {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_SCAN_ENDPOINT.to_string(),
    }
}

/// Discrete state of the upload lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No file has been selected yet.
    Idle,
    /// A file was accepted and its preview generated.
    Selected,
    /// The upload request is in flight.
    Uploading,
    /// A scan result is available.
    Success,
    /// The last submission failed with a classified message.
    Failure,
}

/// One accepted submission waiting for its transport round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingScan {
    /// Validated image handed to the upload client.
    pub image: SelectedImage,
    /// Content fingerprint used for log correlation.
    pub fingerprint: String,
}

/// State machine owning the image-upload-and-result lifecycle.
///
/// The machine re-enters `Selected -> Uploading` on every accepted drop,
/// discarding the previous terminal state first. Exactly one of the scan
/// result and the error message is set after any terminal transition.
#[derive(Debug)]
pub struct UploadLifecycleController {
    phase: ScanPhase,
    previews: PreviewRegistry,
    active_preview: Option<PreviewHandle>,
    scan_result: Option<ScanResult>,
    error_message: Option<String>,
    last_failure: Option<FailureCategory>,
    phase_trace: Vec<ScanPhase>,
}

impl UploadLifecycleController {
    /// Creates a controller in the idle phase.
    pub fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            previews: PreviewRegistry::new(),
            active_preview: None,
            scan_result: None,
            error_message: None,
            last_failure: None,
            phase_trace: vec![ScanPhase::Idle],
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Returns the scan result; present only in [`ScanPhase::Success`].
    pub fn scan_result(&self) -> Option<&ScanResult> {
        self.scan_result.as_ref()
    }

    /// Returns the failure message; present only in [`ScanPhase::Failure`].
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the category of the last failure, if any.
    pub fn last_failure_category(&self) -> Option<FailureCategory> {
        self.last_failure
    }

    /// Returns every phase entered so far, in order.
    pub fn phase_trace(&self) -> &[ScanPhase] {
        &self.phase_trace
    }

    /// Returns the active preview data URI, if one is installed.
    pub fn preview_data_uri(&self) -> Option<&str> {
        self.active_preview
            .and_then(|handle| self.previews.active_preview(handle))
            .map(|preview| preview.data_uri.as_str())
    }

    /// Returns how many preview resources have been revoked so far.
    pub fn previews_revoked(&self) -> u64 {
        self.previews.revoked_count()
    }

    /// Returns `true` when the drop surface may accept a new file.
    ///
    /// While an upload is in flight the drop surface is disabled; this is
    /// admission control, not request cancellation.
    pub fn can_accept_drop(&self) -> bool {
        self.phase() != ScanPhase::Uploading
    }

    /// Accepts a drop and advances the machine to [`ScanPhase::Uploading`].
    ///
    /// # Side effects
    /// Replaces (and revokes) the previous preview, clears any prior scan
    /// result or error message, and records the `Selected -> Uploading`
    /// transitions. On error the machine stays in its prior phase with its
    /// prior preview and terminal values intact.
    ///
    /// # Errors
    /// Returns [`AppError::UploadInFlight`] while a submission is pending.
    /// Returns [`AppError::Intake`] when no dropped file passes the MIME
    /// policy.
    /// Returns [`AppError::Preview`] when the accepted file cannot be
    /// decoded for preview.
    pub fn begin_scan(&mut self, files: Vec<DroppedFile>) -> Result<PendingScan, AppError> {
        if !self.can_accept_drop() {
            return Err(AppError::UploadInFlight);
        }

        let image = select_first_supported(files).map_err(AppError::Intake)?;
        let preview = generate_preview(&image).map_err(AppError::Preview)?;

        self.active_preview = Some(self.previews.install(preview));
        self.scan_result = None;
        self.error_message = None;
        self.last_failure = None;
        self.enter_phase(ScanPhase::Selected);
        self.enter_phase(ScanPhase::Uploading);

        Ok(PendingScan {
            fingerprint: fingerprint_for_image(&image),
            image,
        })
    }

    /// Applies the transport outcome and reaches a terminal phase.
    ///
    /// # Semantics
    /// - Successful responses whose body satisfies the scan contract land in
    ///   [`ScanPhase::Success`] with the confidence scaled to percent.
    /// - Successful responses with a contract-violating body are treated as
    ///   [`FailureCategory::UnknownError`].
    /// - Upload errors are classified through the failure category table;
    ///   the preview is revoked on every failure.
    ///
    /// # Errors
    /// Returns [`AppError::NoUploadPending`] when no submission is in
    /// flight.
    pub fn complete_scan(
        &mut self,
        outcome: Result<ScanHttpResponse, UploadError>,
    ) -> Result<ScanPhase, AppError> {
        if self.phase() != ScanPhase::Uploading {
            return Err(AppError::NoUploadPending);
        }

        match outcome {
            Ok(response) => match parse_scan_response(&response.body)
                .and_then(|parsed| scan_response_to_result(&parsed))
            {
                Ok(result) => {
                    self.scan_result = Some(result);
                    self.error_message = None;
                    self.enter_phase(ScanPhase::Success);
                }
                Err(_) => {
                    self.enter_failure(FailureCategory::UnknownError, MSG_UNKNOWN_ERROR);
                }
            },
            Err(error) => {
                let category = classify_scan_failure(&error);
                let message = user_message(&error);
                self.enter_failure(category, message);
            }
        }

        Ok(self.phase())
    }

    /// Runs one full submission: drop acceptance, upload, classification.
    ///
    /// # Errors
    /// Propagates [`AppError`] values from [`Self::begin_scan`] only; upload
    /// failures terminate in [`ScanPhase::Failure`] instead of erroring.
    pub fn submit(
        &mut self,
        files: Vec<DroppedFile>,
        client: &ScanClient,
    ) -> Result<ScanPhase, AppError> {
        let pending = self.begin_scan(files)?;
        let outcome = client.submit_image(&pending.image);
        self.complete_scan(outcome)
    }

    fn enter_failure(&mut self, category: FailureCategory, message: impl Into<String>) {
        // A failed submission must not keep showing the stale preview.
        self.previews.revoke_active();
        self.active_preview = None;
        self.scan_result = None;
        self.error_message = Some(message.into());
        self.last_failure = Some(category);
        self.enter_phase(ScanPhase::Failure);
    }

    fn enter_phase(&mut self, phase: ScanPhase) {
        self.phase = phase;
        self.phase_trace.push(phase);
    }
}

impl Default for UploadLifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

/// Consolidated runtime status snapshot for simple UI projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStatus {
    /// Lifecycle phase as human-readable string.
    pub phase: String,
    /// Whether the drop surface currently accepts files.
    pub drop_enabled: bool,
    /// Whether a preview is installed.
    pub preview_active: bool,
    /// Result display label (`<food> (<confidence>%)`), if available.
    pub result_label: Option<String>,
    /// Failure message, if the last submission failed.
    pub error: Option<String>,
}

/// Projects controller state into a flat status snapshot.
pub fn project_scan_status(controller: &UploadLifecycleController) -> ScanStatus {
    ScanStatus {
        phase: format!("{:?}", controller.phase()),
        drop_enabled: controller.can_accept_drop(),
        preview_active: controller.preview_data_uri().is_some(),
        result_label: controller.scan_result().map(|result| {
            format!(
                "{} ({:.1}%)",
                result.food_label, result.confidence_percent
            )
        }),
        error: controller.error_message().map(str::to_string),
    }
}

/// Synchronizes UI state with the controller after a lifecycle step.
///
/// Failures surface through both the inline error and the transient
/// notification; any other phase clears the inline error.
pub fn sync_ui(controller: &UploadLifecycleController, ui: &mut UiState, now_ms: u64) {
    ui.set_uploading(controller.phase() == ScanPhase::Uploading);

    match controller.error_message() {
        Some(message) if controller.phase() == ScanPhase::Failure => {
            ui.show_error(message, now_ms);
        }
        _ => ui.clear_error(),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A submission is already in flight.
    #[error("an upload is already in flight")]
    UploadInFlight,
    /// Completion was applied without a pending submission.
    #[error("no upload is pending completion")]
    NoUploadPending,
    /// Drop was rejected by intake policy.
    #[error("intake error: {0}")]
    Intake(IntakeError),
    /// Accepted file could not be decoded for preview.
    #[error("preview error: {0}")]
    Preview(PreviewError),
    /// Upload client configuration error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}
