//! Error types for the LessonReel client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the video generation API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// `detail` field of the error body, when the body carried one
        detail: Option<String>,
        /// Best available description: the detail, the raw body, or a placeholder
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from a status code and the raw response body
    ///
    /// A JSON body of the form `{"detail": "..."}` contributes its detail.
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let detail = serde_json::from_str::<lessonreel_core::dto::video::ErrorDetail>(&body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .filter(|detail| !detail.trim().is_empty());

        let message = match &detail {
            Some(detail) => detail.clone(),
            None if body.trim().is_empty() => "Unknown error".to_string(),
            None => body,
        };

        Self::ApiError {
            status,
            detail,
            message,
        }
    }

    /// Server-provided explanation, if the service sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ApiError { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::ParseError(_) => None,
        }
    }

    /// Check if the service rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_extracts_detail() {
        let err = ClientError::api_error(400, r#"{"detail": "File too large"}"#);
        assert_eq!(err.detail(), Some("File too large"));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "API error (status 400): File too large");
    }

    #[test]
    fn test_api_error_without_detail_uses_body() {
        let err = ClientError::api_error(502, "Bad Gateway");
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "API error (status 502): Bad Gateway");

        let err = ClientError::api_error(500, "");
        assert_eq!(err.to_string(), "API error (status 500): Unknown error");
    }

    #[test]
    fn test_unauthorized() {
        assert!(ClientError::api_error(401, "{}").is_unauthorized());
        assert!(!ClientError::api_error(404, "{}").is_unauthorized());
        assert!(!ClientError::ParseError("x".into()).is_unauthorized());
    }
}
