#![warn(missing_docs)]
//! # mealscan-history
//!
//! ## Purpose
//! Supplies the read-only scan history shown beneath the drop surface.
//!
//! ## Responsibilities
//! - Represent past scan records (label, time, confidence, nutrition).
//! - Project records into display rows with clock labels and confidence
//!   bands.
//! - Define the provider abstraction, with a mock provider until a real
//!   history backend exists.
//!
//! ## Data flow
//! [`HistoryProvider::recent_scans`] -> [`project_record`] -> rendered
//! history rows.
//!
//! ## Ownership and lifetimes
//! Records are owned snapshots; the scan pipeline never writes back into a
//! provider.
//!
//! ## Error model
//! Provider failures and unrepresentable timestamps are reported as
//! [`HistoryError`] values.
//!
//! ## Security and privacy notes
//! History rows contain food labels and nutrition values only; no image
//! bytes or file names are retained.

use mealscan_core::NutritionFacts;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// One past scan shown in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Stable record identifier, descending by recency.
    pub id: u64,
    /// Identified food label.
    pub food_label: String,
    /// Scan time in Unix epoch milliseconds.
    pub scanned_at_ms: u64,
    /// Confidence in percent.
    pub confidence_percent: f32,
    /// Nutrition estimate stored with the record.
    pub nutrition: NutritionFacts,
}

/// Confidence band used to color history badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Above 90 percent.
    High,
    /// Above 70 percent.
    Medium,
    /// Everything else.
    Low,
}

/// Maps a confidence percent onto its display band.
pub fn confidence_band(confidence_percent: f32) -> ConfidenceBand {
    if confidence_percent > 90.0 {
        ConfidenceBand::High
    } else if confidence_percent > 70.0 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

/// Display projection of one history record.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Identified food label.
    pub food_label: String,
    /// Clock-time label (for example `9:26 PM`).
    pub time_label: String,
    /// Confidence in percent.
    pub confidence_percent: f32,
    /// Band selecting the badge color.
    pub band: ConfidenceBand,
    /// Nutrition shown in the expanded row.
    pub nutrition: NutritionFacts,
}

/// Projects one record into its display row.
///
/// # Errors
/// Returns [`HistoryError::InvalidTimestamp`] when the epoch value cannot be
/// represented as a calendar time.
pub fn project_record(record: &ScanRecord) -> Result<HistoryRow, HistoryError> {
    Ok(HistoryRow {
        food_label: record.food_label.clone(),
        time_label: clock_label(record.scanned_at_ms)?,
        confidence_percent: record.confidence_percent,
        band: confidence_band(record.confidence_percent),
        nutrition: record.nutrition.clone(),
    })
}

/// Formats an epoch-milliseconds value as a 12-hour clock label.
///
/// # Errors
/// Returns [`HistoryError::InvalidTimestamp`] for out-of-range epochs.
pub fn clock_label(epoch_ms: u64) -> Result<String, HistoryError> {
    let timestamp = OffsetDateTime::from_unix_timestamp((epoch_ms / 1000) as i64)
        .map_err(|_| HistoryError::InvalidTimestamp(epoch_ms))?;

    let hour = timestamp.hour();
    let (display_hour, meridiem) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };

    Ok(format!("{display_hour}:{:02} {meridiem}", timestamp.minute()))
}

/// Trait implemented by concrete history sources.
pub trait HistoryProvider: Send + Sync {
    /// Lists recent scans, most recent first.
    ///
    /// # Errors
    /// Returns [`HistoryError::Provider`] when the source is unavailable.
    fn recent_scans(&self) -> Result<Vec<ScanRecord>, HistoryError>;
}

/// Deterministic mock provider used until a history backend exists.
#[derive(Debug, Clone, Default)]
pub struct MockHistoryProvider;

impl MockHistoryProvider {
    /// Creates the mock provider.
    pub fn new() -> Self {
        Self
    }
}

impl HistoryProvider for MockHistoryProvider {
    fn recent_scans(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        Ok(vec![
            ScanRecord {
                id: 1,
                food_label: "Fried Rice".to_string(),
                scanned_at_ms: 1_715_721_960_000,
                confidence_percent: 94.8,
                nutrition: NutritionFacts {
                    calories: 156.0,
                    proteins: 3.7,
                    carbs: 29.1,
                    fats: 2.6,
                    serving_size: "100g".to_string(),
                },
            },
            ScanRecord {
                id: 2,
                food_label: "Chicken Curry".to_string(),
                scanned_at_ms: 1_715_718_180_000,
                confidence_percent: 99.2,
                nutrition: NutritionFacts {
                    calories: 171.0,
                    proteins: 5.4,
                    carbs: 16.0,
                    fats: 9.3,
                    serving_size: "100g".to_string(),
                },
            },
            ScanRecord {
                id: 3,
                food_label: "Risotto (Soup)".to_string(),
                scanned_at_ms: 1_715_718_060_000,
                confidence_percent: 51.9,
                nutrition: NutritionFacts {
                    calories: 347.0,
                    proteins: 7.5,
                    carbs: 73.0,
                    fats: 2.4,
                    serving_size: "100g".to_string(),
                },
            },
        ])
    }
}

/// History layer error type.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Epoch value cannot be represented as calendar time.
    #[error("invalid scan timestamp: {0}")]
    InvalidTimestamp(u64),
    /// History source runtime failure.
    #[error("history provider failure: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for history projection.

    use super::*;

    #[test]
    fn confidence_bands_follow_badge_thresholds() {
        assert_eq!(confidence_band(94.8), ConfidenceBand::High);
        assert_eq!(confidence_band(90.0), ConfidenceBand::Medium);
        assert_eq!(confidence_band(70.0), ConfidenceBand::Low);
        assert_eq!(confidence_band(51.9), ConfidenceBand::Low);
    }

    #[test]
    fn clock_labels_use_twelve_hour_time() {
        assert_eq!(clock_label(1_715_721_960_000).unwrap(), "9:26 PM");
        assert_eq!(clock_label(1_715_718_180_000).unwrap(), "8:23 PM");
        // Midnight and noon edge cases.
        assert_eq!(clock_label(0).unwrap(), "12:00 AM");
        assert_eq!(clock_label(12 * 3_600 * 1_000).unwrap(), "12:00 PM");
    }

    #[test]
    fn mock_provider_lists_most_recent_first() {
        let records = MockHistoryProvider::new()
            .recent_scans()
            .expect("mock history should list");

        assert_eq!(records.len(), 3);
        assert!(records.windows(2).all(|pair| pair[0].scanned_at_ms >= pair[1].scanned_at_ms));
        assert_eq!(records[0].food_label, "Fried Rice");

        let row = project_record(&records[0]).expect("row should project");
        assert_eq!(row.time_label, "9:26 PM");
        assert_eq!(row.band, ConfidenceBand::High);
    }
}
