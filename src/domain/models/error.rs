use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Rejected locally, the request never reached the network.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to upload X-ray: {status} - {body}")]
    Upload { status: u16, body: String },

    #[error("{detail}")]
    Chat { detail: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> GatewayError {
        return GatewayError::Network(err.to_string());
    }
}
