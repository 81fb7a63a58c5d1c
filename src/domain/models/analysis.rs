#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ConfidenceLevel {
    #[strum(serialize = "Low Confidence")]
    Low,
    #[strum(serialize = "Medium Confidence")]
    Medium,
    #[strum(serialize = "High Confidence")]
    High,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    /// Always within `0.0..=1.0`.
    pub confidence: f64,
    pub bounding_box: Vec<f64>,
}

impl Detection {
    pub fn confidence_percent(&self) -> f64 {
        return self.confidence * 100.0;
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        let percent = self.confidence_percent();
        if percent < 60.0 {
            return ConfidenceLevel::Low;
        }
        if percent < 80.0 {
            return ConfidenceLevel::Medium;
        }

        return ConfidenceLevel::High;
    }

    pub fn display_name(&self) -> String {
        return self.class_name.replace('_', " ");
    }
}

/// Shape-guaranteed result of one image upload. Only ever built through
/// `normalize`, so every field is populated even when the backend sent
/// something partial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub message: String,
    pub summary: String,
    pub detection_count: u64,
    pub detection_classes: BTreeMap<String, u64>,
    pub detection_details: Vec<Detection>,
    pub output_image_ref: String,
}

impl Default for AnalysisResult {
    fn default() -> AnalysisResult {
        return AnalysisResult {
            success: true,
            message: "".to_string(),
            summary: "".to_string(),
            detection_count: 0,
            detection_classes: BTreeMap::new(),
            detection_details: vec![],
            output_image_ref: "".to_string(),
        };
    }
}

impl AnalysisResult {
    pub fn has_detections(&self) -> bool {
        return !self.detection_details.is_empty() || !self.detection_classes.is_empty();
    }
}
