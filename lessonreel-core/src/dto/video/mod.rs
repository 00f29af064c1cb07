//! Video generation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Body of a successful `POST /generate/from-doc`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: String,
}

/// Body the service attaches to error responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `GET /chat/video_status/{job_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_optional_fields() {
        let response: VideoStatusResponse =
            serde_json::from_str(r#"{"status": "queued"}"#).unwrap();
        assert_eq!(response.status, JobStatus::Queued);
        assert_eq!(response.video_url, None);
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_error_detail_may_be_missing() {
        let detail: ErrorDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.detail, None);

        let detail: ErrorDetail = serde_json::from_str(r#"{"detail": "Not authenticated"}"#).unwrap();
        assert_eq!(detail.detail.as_deref(), Some("Not authenticated"));
    }
}
