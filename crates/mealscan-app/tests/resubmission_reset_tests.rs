//! Integration tests for terminal-state reset on resubmission.

mod common;

use mealscan_app::{ScanPhase, UploadLifecycleController};

#[test]
fn resubmission_reset_tests_new_drop_clears_previous_result_before_upload() {
    let mut controller = UploadLifecycleController::new();
    let succeeding = common::client_with(common::CannedTransport {
        status: 200,
        body: common::success_body("Burger", 0.87, 295.0),
    });

    controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &succeeding)
        .expect("submission should be accepted");
    assert!(controller.scan_result().is_some());

    // The previous result must already be gone once the new request starts.
    let pending = controller
        .begin_scan(vec![common::fixture_jpeg_drop("salad.jpg")])
        .expect("resubmission should be accepted");
    assert_eq!(controller.phase(), ScanPhase::Uploading);
    assert!(controller.scan_result().is_none());
    assert!(controller.error_message().is_none());
    assert!(!pending.fingerprint.is_empty());
}

#[test]
fn resubmission_reset_tests_new_drop_clears_previous_error() {
    let mut controller = UploadLifecycleController::new();
    let failing = common::client_with(common::UnreachableTransport);

    controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &failing)
        .expect("submission should be accepted");
    assert!(controller.error_message().is_some());

    controller
        .begin_scan(vec![common::fixture_jpeg_drop("salad.jpg")])
        .expect("resubmission should be accepted");
    assert!(controller.error_message().is_none());
}

#[test]
fn resubmission_reset_tests_terminal_states_hold_exactly_one_outcome() {
    let mut controller = UploadLifecycleController::new();
    let succeeding = common::client_with(common::CannedTransport {
        status: 200,
        body: common::success_body("Burger", 0.87, 295.0),
    });
    let failing = common::client_with(common::CannedTransport {
        status: 500,
        body: Vec::new(),
    });

    controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &succeeding)
        .expect("submission should be accepted");
    assert!(controller.scan_result().is_some() && controller.error_message().is_none());

    controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &failing)
        .expect("submission should be accepted");
    assert!(controller.scan_result().is_none() && controller.error_message().is_some());
}
