#![warn(missing_docs)]
//! # mealscan-app binary
//!
//! Command-line entry point for the mealscan client pipeline. Runs one
//! submission through the upload lifecycle against the configured scan
//! endpoint and prints the resulting status plus recent history.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use mealscan_app::{
    UploadLifecycleController, app_version, project_scan_status, scan_endpoint_from_env, sync_ui,
};
use mealscan_history::{HistoryProvider, MockHistoryProvider, project_record};
use mealscan_intake::{FsImageSource, ImageSource};
use mealscan_ui::UiState;
use mealscan_upload::{ScanClient, ScanHttpResponse, ScanRequest, ScanTransport, UploadError};
use time::OffsetDateTime;

/// CLI entry point.
fn main() {
    if let Err(error) = run() {
        eprintln!("mealscan failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let endpoint = scan_endpoint_from_env();
    log_info("bootstrap", "startup", &format!("version={}", app_version()));

    let Some(image_path) = std::env::args().nth(1) else {
        println!("mealscan-app {}", app_version());
        println!("scan endpoint: {endpoint} (MEALSCAN_SCAN_ENDPOINT)");
        println!("usage: mealscan-app <image-path>");
        return Ok(());
    };

    let source = FsImageSource::new();
    let dropped = source
        .load_image(&image_path)
        .map_err(|error| format!("image load failed: {error}"))?;
    log_info(
        "intake",
        "file_loaded",
        &format!("file={} bytes={}", dropped.file_name, dropped.bytes.len()),
    );

    let client = ScanClient::new(endpoint, Arc::new(MockScanTransport::default()))
        .map_err(|error| format!("scan client init failed: {error}"))?;

    let mut controller = UploadLifecycleController::new();
    let mut ui = UiState::new(app_version());

    match controller.submit(vec![dropped], &client) {
        Ok(phase) => log_info("scan", "completed", &format!("phase={phase:?}")),
        Err(error) => {
            log_error("scan", "rejected", &error.to_string());
            return Err(format!("submission rejected: {error}"));
        }
    }

    sync_ui(&controller, &mut ui, unix_timestamp_millis());
    let status = project_scan_status(&controller);
    println!("phase: {}", status.phase);
    if let Some(label) = &status.result_label {
        println!("result: {label}");
    }
    if let Some(error) = &status.error {
        println!("error: {error}");
    }

    println!("recent scans:");
    let history = MockHistoryProvider::new()
        .recent_scans()
        .map_err(|error| format!("history listing failed: {error}"))?;
    for record in &history {
        let row = project_record(record).map_err(|error| error.to_string())?;
        println!(
            "  {} | {} | {:.1}% | {:.0} kcal",
            row.time_label, row.food_label, row.confidence_percent, row.nutrition.calories
        );
    }

    Ok(())
}

/// Offline transport used until the real backend endpoint is wired in.
#[derive(Debug, Default)]
struct MockScanTransport;

impl ScanTransport for MockScanTransport {
    fn send(&self, _request: &ScanRequest) -> Result<ScanHttpResponse, UploadError> {
        Ok(ScanHttpResponse {
            status: 200,
            body: br#"{
                "food_item": "Burger",
                "confidence": 0.87,
                "nutrition_data": {
                    "calories": 295, "proteins": 17, "carbs": 30, "fats": 12,
                    "serving_size": "100g"
                }
            }"#
            .to_vec(),
        })
    }
}

fn log_info(stage: &str, action: &str, detail: &str) {
    write_log_line("INFO", stage, action, detail);
}

fn log_error(stage: &str, action: &str, detail: &str) {
    write_log_line("ERROR", stage, action, detail);
}

fn write_log_line(level: &str, stage: &str, action: &str, detail: &str) {
    eprintln!("{} | {level} | {stage} | {action} | {detail}", timestamp_compact_utc());
}

fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}

fn timestamp_compact_utc() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}
