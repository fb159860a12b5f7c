use thiserror::Error;

/// Unified error type for calls against the invoicing backend.
///
/// `Api` carries the backend's own error message verbatim so forms and
/// banners can show the server's reason instead of a paraphrase.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),
}

impl ApiError {
    /// HTTP status of an API-level failure, `None` for transport and decode
    /// errors that never produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(anyhow::Error::new(err))
    }
}
