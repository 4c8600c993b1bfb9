//! Shared fixtures for app integration tests.

use std::sync::Arc;

use mealscan_intake::DroppedFile;
use mealscan_upload::{ScanClient, ScanHttpResponse, ScanRequest, ScanTransport, UploadError};

/// Creates a small decodable JPEG drop fixture.
#[allow(dead_code)]
pub fn fixture_jpeg_drop(name: &str) -> DroppedFile {
    let pixels = image::RgbImage::from_fn(8, 6, |x, y| {
        image::Rgb([(x * 30) as u8, (y * 40) as u8, 128])
    });
    let mut bytes = Vec::new();
    pixels
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Jpeg,
        )
        .expect("fixture jpeg should encode");

    DroppedFile {
        file_name: name.to_string(),
        mime: "image/jpeg".to_string(),
        bytes,
    }
}

/// Creates a success response body in the scan contract shape.
#[allow(dead_code)]
pub fn success_body(food_item: &str, confidence: f64, calories: f64) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "food_item": food_item,
        "confidence": confidence,
        "nutrition_data": {
            "calories": calories,
            "proteins": 17,
            "carbs": 30,
            "fats": 12,
            "serving_size": "100g"
        }
    }))
    .expect("fixture body should encode")
}

/// Transport answering every request with one canned response.
#[allow(dead_code)]
#[derive(Debug)]
pub struct CannedTransport {
    /// HTTP status to answer with.
    pub status: u16,
    /// Body bytes to answer with.
    pub body: Vec<u8>,
}

impl ScanTransport for CannedTransport {
    fn send(&self, _request: &ScanRequest) -> Result<ScanHttpResponse, UploadError> {
        Ok(ScanHttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Transport simulating a connection-level failure.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct UnreachableTransport;

impl ScanTransport for UnreachableTransport {
    fn send(&self, _request: &ScanRequest) -> Result<ScanHttpResponse, UploadError> {
        Err(UploadError::ConnectionFailed(
            "connection refused".to_string(),
        ))
    }
}

/// Transport simulating expiry of the response deadline.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct TimeoutTransport;

impl ScanTransport for TimeoutTransport {
    fn send(&self, _request: &ScanRequest) -> Result<ScanHttpResponse, UploadError> {
        Err(UploadError::Timeout)
    }
}

/// Builds a scan client over the provided transport.
#[allow(dead_code)]
pub fn client_with(transport: impl ScanTransport + 'static) -> ScanClient {
    ScanClient::new("http://localhost:8000/api/scan", Arc::new(transport))
        .expect("scan client should build")
}
