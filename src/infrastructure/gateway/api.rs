#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::multipart;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayError;
use crate::domain::models::ImageFile;
use crate::domain::services::normalize;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    message: String,
    session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    response: String,
    session_id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Option<String>,
}

pub struct ApiGateway {
    url: String,
    client: reqwest::Client,
}

impl Default for ApiGateway {
    fn default() -> ApiGateway {
        return ApiGateway::new(&Config::get(ConfigKey::ApiURL));
    }
}

impl ApiGateway {
    pub fn new(url: &str) -> ApiGateway {
        return ApiGateway {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl Gateway for ApiGateway {
    #[allow(clippy::implicit_return)]
    async fn upload_image(&self, file: &ImageFile) -> Result<AnalysisResult, GatewayError> {
        if !file.is_image() {
            tracing::warn!(
                name = file.name.as_str(),
                media_type = file.media_type.as_str(),
                "Refusing to upload a non-image file"
            );
            return Err(GatewayError::InvalidInput(format!(
                "{name} is not an image ({media_type})",
                name = file.name,
                media_type = file.media_type
            )));
        }

        let url = format!("{url}/api/upload-xray", url = self.url);
        tracing::debug!(name = file.name.as_str(), url = url.as_str(), "Uploading X-ray");

        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.to_string())
            .mime_str(&file.media_type)?;
        let form = multipart::Form::new().part("file", part);

        let res = self.client.post(url).multipart(form).send().await?;
        let status = res.status().as_u16();
        tracing::debug!(status = status, "Upload response");

        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status, body = body.as_str(), "Failed to upload X-ray");
            return Err(GatewayError::Upload { status, body });
        }

        let payload = res.json::<serde_json::Value>().await?;
        tracing::debug!(body = ?payload, "Upload successful");

        return Ok(normalize(&payload));
    }

    #[allow(clippy::implicit_return)]
    async fn converse(&self, text: &str, session_id: &str) -> Result<String, GatewayError> {
        let req = ChatRequest {
            message: text.to_string(),
            session_id: session_id.to_string(),
        };

        let res = self
            .client
            .post(format!("{url}/api/chat", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let detail = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|e| return e.detail)
                .unwrap_or_else(|| return "Failed to send message".to_string());

            tracing::error!(status = status, detail = detail.as_str(), "Failed to send chat message");
            return Err(GatewayError::Chat { detail });
        }

        let chat_res = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?chat_res, "Chat response");

        return Ok(chat_res.response);
    }

    fn resolve_image_url(&self, image_ref: &str) -> String {
        return format!("{url}/api/image/{image_ref}", url = self.url);
    }

    #[allow(clippy::implicit_return)]
    async fn current_analysis(&self) -> Result<serde_json::Value, GatewayError> {
        let res = self
            .client
            .get(format!("{url}/api/current-analysis", url = self.url))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status = status, "Failed to get current analysis");
            return Err(GatewayError::Network(format!(
                "Failed to get current analysis ({status})"
            )));
        }

        return Ok(res.json::<serde_json::Value>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn clear_session(&self, session_id: &str) {
        let res = self
            .client
            .delete(format!(
                "{url}/api/clear-session/{session_id}",
                url = self.url
            ))
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => {
                tracing::debug!(session_id = session_id, "Cleared backend session");
            }
            Ok(res) => {
                tracing::warn!(
                    session_id = session_id,
                    status = res.status().as_u16(),
                    "Backend refused to clear session"
                );
            }
            Err(err) => {
                tracing::warn!(session_id = session_id, error = ?err, "Failed to clear backend session");
            }
        }
    }
}
