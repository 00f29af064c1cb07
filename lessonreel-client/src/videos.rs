//! Video generation API endpoints

use crate::VideoClient;
use crate::error::{ClientError, Result};
use lessonreel_core::domain::history::HistoryEntry;
use lessonreel_core::domain::job::JobId;
use lessonreel_core::domain::submission::SubmissionInput;
use lessonreel_core::dto::video::{CreateJobResponse, VideoStatusResponse};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use tracing::debug;

impl VideoClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a document or text for video generation
    ///
    /// Sends a multipart body with either a `file` part or a `text` field.
    ///
    /// # Returns
    /// The identifier the service assigned to the new job
    pub async fn create_job(&self, input: &SubmissionInput) -> Result<JobId> {
        let url = format!("{}/generate/from-doc", self.base_url);

        let form = match input {
            SubmissionInput::File(upload) => {
                debug!(file = %upload.file_name, bytes = upload.bytes.len(), "Uploading document");
                let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
                Form::new().part("file", part)
            }
            SubmissionInput::Text(text) => {
                debug!(chars = text.chars().count(), "Submitting text");
                Form::new().text("text", text.clone())
            }
        };

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;

        let created: CreateJobResponse = self.handle_response(response).await?;
        if created.job_id.is_empty() {
            return Err(ClientError::ParseError(
                "Job creation response carried an empty job_id".to_string(),
            ));
        }

        Ok(JobId::new(created.job_id))
    }

    /// Get the current status of a job
    ///
    /// The id is opaque and sent as a single, percent-encoded path segment.
    ///
    /// # Arguments
    /// * `job_id` - The identifier returned by [`VideoClient::create_job`]
    pub async fn video_status(&self, job_id: &JobId) -> Result<VideoStatusResponse> {
        let mut url = Url::parse(&format!("{}/chat/video_status", self.base_url))
            .map_err(|e| ClientError::ParseError(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::ParseError("Base URL cannot carry a path".to_string()))?
            .push(job_id.as_str());

        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // History
    // =============================================================================

    /// List every job the current user has submitted
    ///
    /// Entries come back in the order the service sent them.
    pub async fn list_my_videos(&self) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/videos/mine", self.base_url);
        let response = self.authorize(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoCredentials, StaticToken};
    use lessonreel_core::domain::job::JobStatus;
    use lessonreel_core::domain::submission::FileUpload;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_job_from_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/from-doc"))
            .and(header("authorization", "Bearer secret"))
            .and(body_string_contains("name=\"text\""))
            .and(body_string_contains("photosynthesis notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_id": "job-42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let job_id = client
            .create_job(&SubmissionInput::Text("photosynthesis notes".to_string()))
            .await
            .unwrap();

        assert_eq!(job_id, JobId::from("job-42"));
    }

    #[tokio::test]
    async fn test_create_job_uploads_file_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/from-doc"))
            .and(body_string_contains("name=\"file\"; filename=\"cells.txt\""))
            .and(body_string_contains("mitochondria"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_id": "job-7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let upload = FileUpload::new("cells.txt", b"mitochondria".to_vec());
        let job_id = client.create_job(&SubmissionInput::File(upload)).await.unwrap();

        assert_eq!(job_id.as_str(), "job-7");
    }

    #[tokio::test]
    async fn test_create_job_surfaces_server_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/from-doc"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Unsupported document"
            })))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let err = client
            .create_job(&SubmissionInput::Text("x".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Unsupported document"));
    }

    #[tokio::test]
    async fn test_create_job_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/from-doc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let err = client
            .create_job(&SubmissionInput::Text("x".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_video_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/video_status/job-42"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "video_url": "/v/42.mp4"
            })))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let status = client.video_status(&JobId::from("job-42")).await.unwrap();

        assert_eq!(status.status, JobStatus::Completed);
        assert_eq!(status.video_url.as_deref(), Some("/v/42.mp4"));
    }

    #[tokio::test]
    async fn test_video_status_encodes_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/video_status/batch%2F7%3Fx%23y"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "started"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), NoCredentials);
        let status = client.video_status(&JobId::from("batch/7?x#y")).await.unwrap();

        assert_eq!(status.status, JobStatus::Started);
    }

    #[tokio::test]
    async fn test_list_my_videos_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/mine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 3, "topic": "Volcanoes", "status": "started"},
                {"id": 1, "topic": "Fractions", "status": "completed", "video_url": "/v/1.mp4"},
                {"id": 2, "topic": "Cells", "status": "failed"}
            ])))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), StaticToken::new("secret"));
        let videos = client.list_my_videos().await.unwrap();

        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(videos[1].video_url.as_deref(), Some("/v/1.mp4"));
    }

    #[tokio::test]
    async fn test_no_credentials_omits_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/mine"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "Not authenticated"
            })))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), NoCredentials);
        let err = client.list_my_videos().await.unwrap_err();
        assert!(err.is_unauthorized());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
