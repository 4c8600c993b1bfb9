//! Tests selected-image MIME acceptance.

use mealscan_core::{CoreError, SelectedImage, is_supported_mime};

#[test]
fn selected_image_tests_accept_supported_mime_types() {
    for mime in ["image/jpeg", "image/png", "image/gif"] {
        let image = SelectedImage::new("meal.bin", mime, vec![1, 2, 3])
            .expect("supported mime should be accepted");
        assert_eq!(image.len(), 3);
    }
}

#[test]
fn selected_image_tests_reject_unsupported_mime_and_empty_bytes() {
    assert!(matches!(
        SelectedImage::new("doc.pdf", "application/pdf", vec![1]),
        Err(CoreError::UnsupportedMime { .. })
    ));
    assert!(matches!(
        SelectedImage::new("meal.jpg", "image/jpeg", Vec::new()),
        Err(CoreError::EmptyImage)
    ));
    assert!(!is_supported_mime("image/webp"));
}
