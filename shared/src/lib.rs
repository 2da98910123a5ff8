use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Waste category reported by the classification service.
///
/// `Unknown` absorbs any label the service emits that the dashboard does
/// not track; it is never counted under its own name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Paper,
    Can,
    Plastic,
    Trash,
    Error,
    #[serde(other)]
    Unknown,
}

impl Category {
    /// Categories that appear on the dashboard tally.
    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            Category::Paper | Category::Can | Category::Plastic | Category::Trash
        )
    }
}

/// One inference result inside a status snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "classification")]
    pub category: Category,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Milliseconds the service spent on this inference. Doubles as the
    /// marker distinguishing one processing instance from the next.
    #[serde(default)]
    pub processing_time: f64,
}

impl Detection {
    /// Pixel coordinates, present only for detections that located the
    /// subject in the frame.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

/// Point-in-time report from the detector's `/status` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub running: bool,
    #[serde(default, rename = "classification_in_progress")]
    pub classifying: bool,
    #[serde(default)]
    pub in_cooldown: bool,
    #[serde(default, rename = "latest_classification")]
    pub latest_detection: Option<Detection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Success,
    Error,
}

/// Reply to the detector's `/start` and `/stop` calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    pub status: LifecycleStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub running: bool,
}

impl LifecycleResponse {
    pub fn is_success(&self) -> bool {
        self.status == LifecycleStatus::Success
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsResponse {
    /// Base64-encoded mp3 payload.
    pub audio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_snapshot_decodes_wire_names() {
        let raw = r#"{
            "running": true,
            "classification_in_progress": false,
            "in_cooldown": true,
            "latest_classification": {
                "classification": "can",
                "x": 320.0,
                "y": 240.0,
                "processing_time": 12.3
            }
        }"#;
        let snapshot: StatusSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.running);
        assert!(!snapshot.classifying);
        assert!(snapshot.in_cooldown);
        let detection = snapshot.latest_detection.unwrap();
        assert_eq!(detection.category, Category::Can);
        assert_eq!(detection.coordinates(), Some((320.0, 240.0)));
        assert_eq!(detection.processing_time, 12.3);
    }

    #[test]
    fn missing_detection_decodes_as_none() {
        let snapshot: StatusSnapshot =
            serde_json::from_str(r#"{"running": false, "latest_classification": null}"#).unwrap();
        assert!(snapshot.latest_detection.is_none());
        assert!(!snapshot.classifying);
    }

    #[test]
    fn unrecognized_category_maps_to_unknown() {
        let detection: Detection =
            serde_json::from_str(r#"{"classification": "glass", "processing_time": 5.0}"#).unwrap();
        assert_eq!(detection.category, Category::Unknown);
        assert!(!detection.category.is_countable());
        assert!(detection.coordinates().is_none());
    }

    #[test]
    fn lifecycle_response_success_flag() {
        let ok: LifecycleResponse =
            serde_json::from_str(r#"{"status": "success", "message": "started", "running": true}"#)
                .unwrap();
        assert!(ok.is_success());

        let failed: LifecycleResponse =
            serde_json::from_str(r#"{"status": "error", "message": "camera busy"}"#).unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.message.as_deref(), Some("camera busy"));
    }
}
