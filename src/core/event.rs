//! Detected flowering events.

use crate::core::series::Location;
use chrono::NaiveDate;
use serde::Serialize;

/// Kind of detected vegetation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BriefFlowering,
    TypicalFlowering,
    ExtendedFlowering,
    VegetationPulse,
}

impl EventType {
    /// Classify an event from its duration and intensity.
    pub fn classify(duration_days: i64, intensity: f64) -> Self {
        if duration_days < 10 {
            if intensity > 0.1 {
                EventType::BriefFlowering
            } else {
                EventType::VegetationPulse
            }
        } else if duration_days < 25 {
            EventType::TypicalFlowering
        } else {
            EventType::ExtendedFlowering
        }
    }

    /// Human-readable label used in event descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::BriefFlowering => "Brief, intense flowering event",
            EventType::TypicalFlowering => "Typical flowering event",
            EventType::ExtendedFlowering => "Extended flowering event",
            EventType::VegetationPulse => "Vegetation growth pulse",
        }
    }
}

/// Confidence bucket for a detected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Bucket a numeric confidence score.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceLevel::High
        } else if confidence > 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

/// A detected flowering event.
///
/// Created once by the detector and never mutated afterward. Serializes to
/// the JSON wire shape with dates as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Serialize)]
pub struct FloweringEvent {
    pub start_date: NaiveDate,
    pub peak_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub peak_value: f64,
    /// Peak value minus the series mean.
    pub intensity: f64,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub event_type: EventType,
    pub description: String,
    pub location: Location,
    pub data_source: serde_json::Value,
}
