use anyhow::Result;
use serde_json::Value;
use test_utils::analysis_fixture;

use super::UploadWorkflow;
use super::UPLOAD_ERROR_TEXT;
use crate::domain::models::AnalysisResult;
use crate::domain::models::GatewayError;
use crate::domain::models::ImageFile;
use crate::domain::models::UploadState;
use crate::domain::models::UploadTicket;
use crate::domain::services::normalize;

fn png(name: &str) -> ImageFile {
    return ImageFile::new(name, "image/png", vec![1, 2, 3]);
}

fn fixture_result() -> Result<AnalysisResult> {
    let payload: Value = serde_json::from_str(analysis_fixture())?;
    return Ok(normalize(&payload));
}

#[test]
fn it_starts_idle() {
    let workflow = UploadWorkflow::default();
    assert_eq!(workflow.state(), UploadState::Idle);
    assert!(workflow.uploaded_file().is_none());
    assert!(workflow.analysis().is_none());
    assert!(!workflow.is_panel_visible());
}

#[test]
fn it_rejects_non_images_without_changes() {
    let mut workflow = UploadWorkflow::default();
    let res = workflow.select(&ImageFile::new("notes.pdf", "application/pdf", vec![]));

    assert_eq!(
        res,
        Err(GatewayError::InvalidInput(
            "Please select an image file".to_string()
        ))
    );
    assert_eq!(workflow.state(), UploadState::Idle);
    assert!(workflow.uploaded_file().is_none());
}

#[test]
fn it_stores_analysis_on_success() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let ticket = workflow.select(&png("opg.png"))?;
    assert_eq!(workflow.state(), UploadState::Uploading);
    assert_eq!(workflow.uploaded_file(), Some("opg.png"));

    let text = workflow.complete(ticket, Ok(fixture_result()?));

    insta::assert_snapshot!(text.unwrap(), @r###"
    X-ray analysis complete! Found 5 findings: 3 caries, 1 impacted tooth, 1 periapical lesion.

    Feel free to ask me any questions about the findings.
    "###);
    assert_eq!(workflow.state(), UploadState::AnalysisReady);
    assert_eq!(workflow.analysis().unwrap().detection_count, 5);
    assert!(workflow.is_panel_visible());

    return Ok(());
}

#[test]
fn it_apologizes_on_failure_and_keeps_previous_analysis() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let first = workflow.select(&png("first.png"))?;
    workflow.complete(first, Ok(fixture_result()?));

    let second = workflow.select(&png("second.png"))?;
    let text = workflow.complete(
        second,
        Err(GatewayError::Upload {
            status: 500,
            body: "Analysis failed: model crashed".to_string(),
        }),
    );

    assert_eq!(text, Some(UPLOAD_ERROR_TEXT.to_string()));
    assert!(!text.unwrap().contains("model crashed"));
    assert_eq!(workflow.state(), UploadState::Failed);
    assert_eq!(workflow.analysis().unwrap().detection_count, 5);

    return Ok(());
}

#[test]
fn it_supersedes_earlier_uploads() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let first = workflow.select(&png("first.png"))?;
    let second = workflow.select(&png("second.png"))?;

    assert_eq!(workflow.complete(first, Ok(fixture_result()?)), None);
    assert!(workflow.analysis().is_none());
    assert_eq!(workflow.state(), UploadState::Uploading);

    let mut result = fixture_result()?;
    result.summary = "Second scan".to_string();
    assert!(workflow.complete(second, Ok(result)).is_some());
    assert_eq!(workflow.analysis().unwrap().summary, "Second scan");
    assert_eq!(workflow.uploaded_file(), Some("second.png"));

    return Ok(());
}

#[test]
fn it_replaces_rather_than_merges_analysis() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let first = workflow.select(&png("first.png"))?;
    workflow.complete(first, Ok(fixture_result()?));

    let second = workflow.select(&png("second.png"))?;
    workflow.complete(second, Ok(AnalysisResult::default()));

    let analysis = workflow.analysis().unwrap();
    assert_eq!(analysis.detection_count, 0);
    assert!(analysis.detection_classes.is_empty());

    return Ok(());
}

#[test]
fn it_removes_file_and_analysis_together() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let ticket = workflow.select(&png("opg.png"))?;
    workflow.complete(ticket, Ok(fixture_result()?));

    workflow.remove_file();

    assert!(workflow.uploaded_file().is_none());
    assert!(workflow.analysis().is_none());
    assert!(!workflow.is_panel_visible());
    assert_eq!(workflow.state(), UploadState::Idle);

    return Ok(());
}

#[test]
fn it_drops_results_arriving_after_removal() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    let ticket = workflow.select(&png("opg.png"))?;
    workflow.remove_file();

    assert_eq!(workflow.complete(ticket, Ok(fixture_result()?)), None);
    assert!(workflow.analysis().is_none());
    assert!(workflow.uploaded_file().is_none());

    return Ok(());
}

#[test]
fn it_ignores_unknown_tickets() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    workflow.select(&png("opg.png"))?;

    assert_eq!(workflow.complete(UploadTicket::new(42), Ok(fixture_result()?)), None);
    assert_eq!(workflow.state(), UploadState::Uploading);

    return Ok(());
}

#[test]
fn it_toggles_panel_only_with_analysis() -> Result<()> {
    let mut workflow = UploadWorkflow::default();
    workflow.toggle_panel();
    assert!(!workflow.is_panel_visible());

    let ticket = workflow.select(&png("opg.png"))?;
    workflow.complete(ticket, Ok(fixture_result()?));
    assert!(workflow.is_panel_visible());

    workflow.toggle_panel();
    assert!(!workflow.is_panel_visible());

    return Ok(());
}
