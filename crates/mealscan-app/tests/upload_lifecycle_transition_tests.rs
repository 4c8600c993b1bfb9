//! Integration tests for upload lifecycle phase transitions.

mod common;

use mealscan_app::{ScanPhase, UploadLifecycleController};

#[test]
fn upload_lifecycle_transition_tests_success_path_never_skips_uploading() {
    let mut controller = UploadLifecycleController::new();
    let client = common::client_with(common::CannedTransport {
        status: 200,
        body: common::success_body("Burger", 0.87, 295.0),
    });

    let phase = controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &client)
        .expect("submission should be accepted");

    assert_eq!(phase, ScanPhase::Success);
    assert_eq!(
        controller.phase_trace(),
        [
            ScanPhase::Idle,
            ScanPhase::Selected,
            ScanPhase::Uploading,
            ScanPhase::Success,
        ]
    );
}

#[test]
fn upload_lifecycle_transition_tests_failure_reenters_through_uploading() {
    let mut controller = UploadLifecycleController::new();
    let failing = common::client_with(common::UnreachableTransport);
    let succeeding = common::client_with(common::CannedTransport {
        status: 200,
        body: common::success_body("Salad", 0.72, 120.0),
    });

    controller
        .submit(vec![common::fixture_jpeg_drop("first.jpg")], &failing)
        .expect("submission should be accepted");
    assert_eq!(controller.phase(), ScanPhase::Failure);

    controller
        .submit(vec![common::fixture_jpeg_drop("second.jpg")], &succeeding)
        .expect("resubmission should be accepted");

    assert_eq!(
        controller.phase_trace(),
        [
            ScanPhase::Idle,
            ScanPhase::Selected,
            ScanPhase::Uploading,
            ScanPhase::Failure,
            ScanPhase::Selected,
            ScanPhase::Uploading,
            ScanPhase::Success,
        ]
    );
}

#[test]
fn upload_lifecycle_transition_tests_rejected_drop_leaves_phase_unchanged() {
    let mut controller = UploadLifecycleController::new();

    let error = controller
        .begin_scan(Vec::new())
        .expect_err("empty drop must be rejected");
    assert!(matches!(error, mealscan_app::AppError::Intake(_)));
    assert_eq!(controller.phase(), ScanPhase::Idle);
    assert_eq!(controller.phase_trace(), [ScanPhase::Idle]);
}
