//! Scripted backend for engine tests

use async_trait::async_trait;
use lessonreel_client::{ClientError, Result};
use lessonreel_core::domain::history::HistoryEntry;
use lessonreel_core::domain::job::{JobId, JobStatus};
use lessonreel_core::domain::submission::SubmissionInput;
use lessonreel_core::dto::video::VideoStatusResponse;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::backend::VideoBackend;

/// One scripted answer
pub(crate) enum Reply<T> {
    Ok(T),
    /// HTTP error with the given status and body
    Fail(u16, &'static str),
    /// Answer after a delay
    Delayed(Duration, T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(SubmissionInput),
    Status(String),
    History,
}

/// Backend answering from per-endpoint scripts and recording every call
///
/// An exhausted script answers with a 503.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    create: Mutex<VecDeque<Reply<String>>>,
    statuses: Mutex<HashMap<String, VecDeque<Reply<VideoStatusResponse>>>>,
    history: Mutex<VecDeque<Reply<Vec<HistoryEntry>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, reply: Reply<String>) -> Self {
        self.create.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_status(self, job_id: &str, reply: Reply<VideoStatusResponse>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .entry(job_id.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_history(self, reply: Reply<Vec<HistoryEntry>>) -> Self {
        self.history.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Job ids of every status probe, in the order they were issued
    pub fn probes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Status(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Create(_)))
            .count()
    }

    pub fn history_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::History))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn resolve<T>(reply: Option<Reply<T>>) -> Result<T> {
    match reply {
        Some(Reply::Ok(value)) => Ok(value),
        Some(Reply::Fail(status, body)) => Err(ClientError::api_error(status, body)),
        Some(Reply::Delayed(delay, value)) => {
            tokio::time::sleep(delay).await;
            Ok(value)
        }
        None => Err(ClientError::api_error(503, "script exhausted")),
    }
}

#[async_trait]
impl VideoBackend for ScriptedBackend {
    async fn create_job(&self, input: &SubmissionInput) -> Result<JobId> {
        self.record(Call::Create(input.clone()));
        let reply = self.create.lock().unwrap().pop_front();
        resolve(reply).await.map(JobId::new)
    }

    async fn video_status(&self, job_id: &JobId) -> Result<VideoStatusResponse> {
        self.record(Call::Status(job_id.to_string()));
        let reply = self
            .statuses
            .lock()
            .unwrap()
            .get_mut(job_id.as_str())
            .and_then(|script| script.pop_front());
        resolve(reply).await
    }

    async fn list_my_videos(&self) -> Result<Vec<HistoryEntry>> {
        self.record(Call::History);
        let reply = self.history.lock().unwrap().pop_front();
        resolve(reply).await
    }
}

pub(crate) fn report(status: JobStatus) -> VideoStatusResponse {
    VideoStatusResponse {
        status,
        video_url: None,
        message: None,
    }
}

pub(crate) fn completed(url: &str) -> VideoStatusResponse {
    VideoStatusResponse {
        video_url: Some(url.to_string()),
        ..report(JobStatus::Completed)
    }
}

pub(crate) fn failed(message: Option<&str>) -> VideoStatusResponse {
    VideoStatusResponse {
        message: message.map(str::to_string),
        ..report(JobStatus::Failed)
    }
}

pub(crate) fn entry(id: &str, topic: &str, status: JobStatus) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        topic: topic.to_string(),
        status,
        video_url: None,
    }
}
