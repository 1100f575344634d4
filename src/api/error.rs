//! Error type for backend calls

use reqwest::StatusCode;

/// Everything that can go wrong talking to the CMS backend.
///
/// The taxonomy is deliberately flat; callers decide how to surface each case.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Request failed with status {status}")]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client-side validation rejected the input before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation requires a signed-in session
    #[error("Sign in required")]
    Unauthenticated,

    /// Reading a file selected for upload failed
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status, when the backend produced one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body parsed as JSON, when the backend produced one
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Human readable message carried in the error body (`message` or `error`)
    pub fn server_message(&self) -> Option<String> {
        let body = self.body_json()?;
        ["message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_from_body() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"Title is required"}"#.to_string(),
        };

        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.server_message().as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_server_message_absent_for_plain_body() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        assert_eq!(err.server_message(), None);
        assert_eq!(ApiError::Unauthenticated.status(), None);
    }
}
