use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum QotaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Capture backend error (status: {status:?}): {message}")]
    Backend {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl QotaError {
    pub fn backend(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        QotaError::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        QotaError::Validation(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            QotaError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            QotaError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check that the capture backend is running and reachable; retry.",
            ),
            QotaError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Validation,
                e.to_string(),
                "Verify the URL format (e.g., http://127.0.0.1:9222).",
            ),
            QotaError::Backend { status, message } => ErrorPayload::new(
                ErrorCategory::Backend,
                format!("Capture backend error (status {:?}): {}", status, message),
                "The capture was not performed; check the DevTools endpoint and the backend logs, then retry.",
            ),
            QotaError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Validation,
                e.to_string(),
                "The backend response could not be decoded; check backend version.",
            ),
            QotaError::Validation(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("devtools") {
                    ErrorPayload::new(
                        ErrorCategory::Validation,
                        msg.to_string(),
                        "Pass --devtools-url pointing at a Chrome started with --remote-debugging-port (e.g., http://127.0.0.1:9222).",
                    )
                } else if lower.contains("in flight") {
                    ErrorPayload::new(
                        ErrorCategory::Validation,
                        msg.to_string(),
                        "Wait for the current capture round to finish before starting another.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Validation,
                        msg.to_string(),
                        "Check the provided flags and values.",
                    )
                }
            }
            QotaError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, QotaError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Io,
    Network,
    Backend,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
