//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dto::video::VideoStatusResponse;

/// Message shown when the service reports a failure without explaining it
pub const GENERIC_FAILURE_MESSAGE: &str = "Video generation failed.";

/// Opaque job identifier assigned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Job status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Started,
    Completed,
    Failed,
}

impl JobStatus {
    /// `completed` and `failed` end a job; nothing follows them
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Started => "started",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a job together with the data that status carries
///
/// A result URL only exists once the job completed, and an error message only
/// once it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobProgress {
    Queued,
    Started,
    Completed { result_url: Option<String> },
    Failed { message: String },
}

impl JobProgress {
    /// Builds the progress described by a status response
    ///
    /// A `failed` report without a message gets [`GENERIC_FAILURE_MESSAGE`].
    /// Fields that do not belong to the reported status are ignored.
    pub fn from_report(report: VideoStatusResponse) -> Self {
        match report.status {
            JobStatus::Queued => JobProgress::Queued,
            JobStatus::Started => JobProgress::Started,
            JobStatus::Completed => JobProgress::Completed {
                result_url: report.video_url,
            },
            JobStatus::Failed => JobProgress::Failed {
                message: report
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            },
        }
    }

    pub fn status(&self) -> JobStatus {
        match self {
            JobProgress::Queued => JobStatus::Queued,
            JobProgress::Started => JobStatus::Started,
            JobProgress::Completed { .. } => JobStatus::Completed,
            JobProgress::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn result_url(&self) -> Option<&str> {
        match self {
            JobProgress::Completed { result_url } => result_url.as_deref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            JobProgress::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// A submitted job as tracked by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub progress: JobProgress,
}

impl Job {
    /// A freshly accepted job starts out queued
    pub fn queued(id: JobId) -> Self {
        Self {
            id,
            progress: JobProgress::Queued,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.progress.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: JobStatus, video_url: Option<&str>, message: Option<&str>) -> VideoStatusResponse {
        VideoStatusResponse {
            status,
            video_url: video_url.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: JobStatus = serde_json::from_str("\"started\"").unwrap();
        assert_eq!(status, JobStatus::Started);
        assert!(serde_json::from_str::<JobStatus>("\"running\"").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Started.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_completed_report_keeps_url() {
        let progress = JobProgress::from_report(report(JobStatus::Completed, Some("/v/1.mp4"), None));
        assert_eq!(progress.result_url(), Some("/v/1.mp4"));
        assert_eq!(progress.error_message(), None);
    }

    #[test]
    fn test_failed_report_falls_back_to_generic_message() {
        let progress = JobProgress::from_report(report(JobStatus::Failed, None, None));
        assert_eq!(progress.error_message(), Some(GENERIC_FAILURE_MESSAGE));

        let progress = JobProgress::from_report(report(JobStatus::Failed, None, Some("oops")));
        assert_eq!(progress.error_message(), Some("oops"));
    }

    #[test]
    fn test_stray_fields_are_ignored() {
        let progress =
            JobProgress::from_report(report(JobStatus::Started, Some("/v/1.mp4"), Some("noise")));
        assert_eq!(progress, JobProgress::Started);
        assert_eq!(progress.result_url(), None);
        assert_eq!(progress.error_message(), None);
    }
}
