//! Integration tests for failure surfacing through UI state.

mod common;

use mealscan_app::{UploadLifecycleController, sync_ui};
use mealscan_ui::{NOTIFICATION_AUTO_DISMISS_MS, NotificationSeverity, UiState};

#[test]
fn notification_surface_tests_failure_raises_inline_and_transient_messages() {
    let mut controller = UploadLifecycleController::new();
    let mut ui = UiState::new("v0.1.0");
    let client = common::client_with(common::UnreachableTransport);

    controller
        .submit(vec![common::fixture_jpeg_drop("burger.jpg")], &client)
        .expect("submission should be accepted");
    sync_ui(&controller, &mut ui, 10_000);

    assert_eq!(ui.inline_error.as_deref(), controller.error_message());
    let notification = ui.notification.clone().expect("notification should show");
    assert_eq!(notification.severity, NotificationSeverity::Error);

    // Transient surface auto-dismisses after six seconds.
    ui.dismiss_expired(10_000 + NOTIFICATION_AUTO_DISMISS_MS);
    assert!(ui.notification.is_none());
    assert!(ui.inline_error.is_some());
}

#[test]
fn notification_surface_tests_success_clears_the_inline_error() {
    let mut controller = UploadLifecycleController::new();
    let mut ui = UiState::new("v0.1.0");

    controller
        .submit(
            vec![common::fixture_jpeg_drop("burger.jpg")],
            &common::client_with(common::UnreachableTransport),
        )
        .expect("submission should be accepted");
    sync_ui(&controller, &mut ui, 1_000);
    assert!(ui.inline_error.is_some());

    controller
        .submit(
            vec![common::fixture_jpeg_drop("burger.jpg")],
            &common::client_with(common::CannedTransport {
                status: 200,
                body: common::success_body("Burger", 0.87, 295.0),
            }),
        )
        .expect("resubmission should be accepted");
    sync_ui(&controller, &mut ui, 2_000);

    assert!(ui.inline_error.is_none());
    assert!(ui.drop_enabled());
}
