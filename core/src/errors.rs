use thiserror::Error;

/// Onboarding assistant errors
#[derive(Error, Debug)]
pub enum OnboardError {
    #[error("API Error: {0}")]
    ApiError(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl OnboardError {
    /// True when the failure happened before a well-formed reply came back:
    /// connection refused, timeout, non-2xx status, unreadable body.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            OnboardError::RequestError(_)
                | OnboardError::HttpError { .. }
                | OnboardError::ReqwestError(_)
                | OnboardError::IoError(_)
        )
    }
}

/// Result type for onboarding assistant operations
pub type OnboardResult<T> = Result<T, OnboardError>;
