//! Backend seam
//!
//! The engine talks to the service through [`VideoBackend`] so the timers can
//! be driven by scripted fakes in tests.

use async_trait::async_trait;
use lessonreel_client::{Result, VideoClient};
use lessonreel_core::domain::history::HistoryEntry;
use lessonreel_core::domain::job::JobId;
use lessonreel_core::domain::submission::SubmissionInput;
use lessonreel_core::dto::video::VideoStatusResponse;

/// The three requests the engine issues
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// One-shot job creation
    async fn create_job(&self, input: &SubmissionInput) -> Result<JobId>;

    /// Job Status Channel: current status of one job
    async fn video_status(&self, job_id: &JobId) -> Result<VideoStatusResponse>;

    /// History Channel: every job the user has submitted
    async fn list_my_videos(&self) -> Result<Vec<HistoryEntry>>;
}

#[async_trait]
impl VideoBackend for VideoClient {
    async fn create_job(&self, input: &SubmissionInput) -> Result<JobId> {
        VideoClient::create_job(self, input).await
    }

    async fn video_status(&self, job_id: &JobId) -> Result<VideoStatusResponse> {
        VideoClient::video_status(self, job_id).await
    }

    async fn list_my_videos(&self) -> Result<Vec<HistoryEntry>> {
        VideoClient::list_my_videos(self).await
    }
}
