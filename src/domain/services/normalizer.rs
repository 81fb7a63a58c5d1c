#[cfg(test)]
#[path = "normalizer_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::domain::models::AnalysisResult;
use crate::domain::models::Detection;

fn string_field(obj: Option<&Map<String, Value>>, key: &str) -> String {
    return obj
        .and_then(|e| return e.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
}

fn count(value: Option<&Value>) -> u64 {
    return value.and_then(Value::as_u64).unwrap_or(0);
}

fn detection(value: &Value) -> Option<Detection> {
    let obj = value.as_object()?;

    let mut confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if !confidence.is_finite() {
        confidence = 0.0;
    }

    let bounding_box = obj
        .get("bbox")
        .and_then(Value::as_array)
        .map(|coords| {
            return coords.iter().filter_map(Value::as_f64).collect::<Vec<f64>>();
        })
        .unwrap_or_default();

    return Some(Detection {
        class_name: string_field(Some(obj), "class"),
        confidence: confidence.clamp(0.0, 1.0),
        bounding_box,
    });
}

/// Coerces whatever the upload endpoint returned into a fully populated
/// `AnalysisResult`. Every field defaults on its own, nothing here can fail.
pub fn normalize(payload: &Value) -> AnalysisResult {
    let root = payload.as_object();
    let detections = root
        .and_then(|e| return e.get("detections"))
        .and_then(Value::as_object);

    let detection_classes = detections
        .and_then(|e| return e.get("classes"))
        .and_then(Value::as_object)
        .map(|classes| {
            return classes
                .iter()
                .map(|(name, value)| return (name.to_string(), count(Some(value))))
                .collect::<BTreeMap<String, u64>>();
        })
        .unwrap_or_default();

    let detection_details = detections
        .and_then(|e| return e.get("details"))
        .and_then(Value::as_array)
        .map(|details| return details.iter().filter_map(detection).collect::<Vec<Detection>>())
        .unwrap_or_default();

    return AnalysisResult {
        success: root
            .and_then(|e| return e.get("success"))
            .and_then(Value::as_bool)
            .unwrap_or(true),
        message: string_field(root, "message"),
        summary: string_field(root, "analysis_summary"),
        detection_count: count(detections.and_then(|e| return e.get("count"))),
        detection_classes,
        detection_details,
        output_image_ref: string_field(root, "output_image_path"),
    };
}
