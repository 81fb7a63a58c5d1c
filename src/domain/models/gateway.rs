use std::sync::Arc;

use async_trait::async_trait;

use super::AnalysisResult;
use super::GatewayError;
use super::ImageFile;

pub type GatewayBox = Arc<dyn Gateway + Send + Sync>;

#[async_trait]
pub trait Gateway {
    /// Uploads an image for analysis. Non-image media types are rejected
    /// with `GatewayError::InvalidInput` before any request is made. The
    /// backend payload is always passed through `normalize`, so the result is
    /// fully populated.
    async fn upload_image(&self, file: &ImageFile) -> Result<AnalysisResult, GatewayError>;

    /// Sends one chat turn and returns the complete reply text. The backend
    /// has no incremental delivery, see `StreamSimulator`.
    async fn converse(&self, text: &str, session_id: &str) -> Result<String, GatewayError>;

    /// Builds the display URL for an analyzed image. Performs no I/O.
    fn resolve_image_url(&self, image_ref: &str) -> String;

    /// Raw payload of the backend's most recent analysis.
    async fn current_analysis(&self) -> Result<serde_json::Value, GatewayError>;

    /// Best effort request for the backend to drop its conversation history.
    /// Failures are logged, never returned.
    async fn clear_session(&self, session_id: &str);
}
