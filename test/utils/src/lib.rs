pub fn analysis_fixture() -> &'static str {
    return r#"
{
  "success": true,
  "message": "X-ray analyzed successfully",
  "detections": {
    "count": 5,
    "classes": {
      "caries": 3,
      "impacted_tooth": 1,
      "periapical_lesion": 1
    },
    "details": [
      { "class": "caries", "confidence": 0.91, "bbox": [120.5, 80.0, 160.25, 130.0] },
      { "class": "caries", "confidence": 0.72, "bbox": [300.0, 95.5, 340.0, 140.0] },
      { "class": "caries", "confidence": 0.55, "bbox": [410.0, 88.0, 445.5, 129.0] },
      { "class": "impacted_tooth", "confidence": 0.84, "bbox": [610.0, 200.0, 700.0, 290.0] },
      { "class": "periapical_lesion", "confidence": 0.63, "bbox": [220.0, 240.0, 260.0, 280.0] }
    ]
  },
  "output_image_path": "analyzed_opg.png",
  "analysis_summary": "Found 5 findings: 3 caries, 1 impacted tooth, 1 periapical lesion."
}
"#
    .trim();
}

pub fn reply_fixture() -> &'static str {
    return "Caries is tooth decay caused by bacteria.\n\nThe three areas flagged on your X-ray should be reviewed by a dentist.";
}
