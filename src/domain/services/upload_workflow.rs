#[cfg(test)]
#[path = "upload_workflow_test.rs"]
mod tests;

use crate::domain::models::AnalysisResult;
use crate::domain::models::GatewayError;
use crate::domain::models::ImageFile;
use crate::domain::models::UploadState;
use crate::domain::models::UploadTicket;

pub const UPLOAD_ERROR_TEXT: &str = "Sorry, there was an error analyzing the X-ray. Please make sure the backend server is running and try again.";

pub fn analysis_complete_text(result: &AnalysisResult) -> String {
    return format!(
        "X-ray analysis complete! {}\n\nFeel free to ask me any questions about the findings.",
        result.summary
    );
}

/// Idle -> Uploading -> AnalysisReady | Failed. A new selection always
/// supersedes the one in flight: results for older tickets are dropped.
pub struct UploadWorkflow {
    state: UploadState,
    generation: u64,
    uploaded_file: Option<String>,
    analysis: Option<AnalysisResult>,
    panel_visible: bool,
}

impl Default for UploadWorkflow {
    fn default() -> UploadWorkflow {
        return UploadWorkflow {
            state: UploadState::Idle,
            generation: 0,
            uploaded_file: None,
            analysis: None,
            panel_visible: false,
        };
    }
}

impl UploadWorkflow {
    pub fn state(&self) -> UploadState {
        return self.state;
    }

    pub fn is_uploading(&self) -> bool {
        return self.state == UploadState::Uploading;
    }

    pub fn uploaded_file(&self) -> Option<&str> {
        return self.uploaded_file.as_deref();
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        return self.analysis.as_ref();
    }

    pub fn is_panel_visible(&self) -> bool {
        return self.panel_visible && self.analysis.is_some();
    }

    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    /// Validates the selection and issues the ticket the upload must be
    /// completed with. Non-images leave every field untouched.
    pub fn select(&mut self, file: &ImageFile) -> Result<UploadTicket, GatewayError> {
        if !file.is_image() {
            return Err(GatewayError::InvalidInput(
                "Please select an image file".to_string(),
            ));
        }

        self.generation += 1;
        self.uploaded_file = Some(file.name.to_string());
        self.state = UploadState::Uploading;

        return Ok(UploadTicket::new(self.generation));
    }

    /// Applies an upload outcome and returns the notification to append to
    /// the conversation, or `None` when the ticket has been superseded.
    pub fn complete(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<AnalysisResult, GatewayError>,
    ) -> Option<String> {
        if ticket != UploadTicket::new(self.generation) || !self.is_uploading() {
            tracing::debug!(ticket = %ticket, "Dropping superseded upload result");
            return None;
        }

        match outcome {
            Ok(result) => {
                let text = analysis_complete_text(&result);
                self.analysis = Some(result);
                self.panel_visible = true;
                self.state = UploadState::AnalysisReady;

                return Some(text);
            }
            Err(err) => {
                tracing::error!(error = ?err, ticket = %ticket, "Upload failed");
                self.state = UploadState::Failed;

                return Some(UPLOAD_ERROR_TEXT.to_string());
            }
        }
    }

    /// Forgets the file and its analysis together. Any upload still in flight
    /// is invalidated.
    pub fn remove_file(&mut self) {
        *self = UploadWorkflow {
            generation: self.generation + 1,
            ..UploadWorkflow::default()
        };
    }
}
