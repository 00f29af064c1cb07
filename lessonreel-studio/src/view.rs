//! Video view
//!
//! One mounted video-generation view: its state surface, the submission
//! coordinator with its status poller, and the history refresher. Tearing the
//! view down cancels both timers and makes any late response a no-op.

use lessonreel_core::domain::job::JobId;
use lessonreel_core::domain::submission::SubmissionForm;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::backend::VideoBackend;
use crate::config::StudioConfig;
use crate::error::SubmitError;
use crate::scheduler::{HistoryRefresher, StatusPoller};
use crate::state::{JobSlot, ViewSnapshot, ViewState};
use crate::submission::SubmissionCoordinator;

/// A mounted video view
///
/// Must be created inside a Tokio runtime. Dropping the view tears it down.
pub struct VideoView {
    state: Arc<ViewState>,
    coordinator: SubmissionCoordinator,
    refresher: HistoryRefresher,
}

impl VideoView {
    /// Mounts the view and starts refreshing the history right away
    pub fn mount(config: &StudioConfig, backend: Arc<dyn VideoBackend>) -> Self {
        let state = Arc::new(ViewState::new());

        let poller = StatusPoller::new(Arc::clone(&backend), Arc::clone(&state), config.poll_interval);
        let coordinator = SubmissionCoordinator::new(Arc::clone(&backend), Arc::clone(&state), poller);
        let refresher = HistoryRefresher::new(backend, Arc::clone(&state), config.history_interval);
        refresher.start();

        info!("Video view mounted");

        Self {
            state,
            coordinator,
            refresher,
        }
    }

    /// Submits a new job; see [`SubmissionCoordinator::submit`]
    pub async fn submit(&self, form: SubmissionForm) -> Result<JobId, SubmitError> {
        self.coordinator.submit(form).await
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.snapshot()
    }

    /// Changes to the job surface
    pub fn job_updates(&self) -> watch::Receiver<u64> {
        self.state.subscribe_job()
    }

    /// Successful history refreshes
    pub fn history_updates(&self) -> watch::Receiver<u64> {
        self.state.subscribe_history()
    }

    pub fn is_polling(&self) -> bool {
        self.coordinator.poller().is_active()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.is_active()
    }

    /// Waits until the current job finishes
    ///
    /// Also returns when no job is held (e.g. the submission was rejected) or
    /// the view is torn down.
    pub async fn wait_for_terminal(&self) -> ViewSnapshot {
        let mut updates = self.state.subscribe_job();

        loop {
            let snapshot = self.state.snapshot();
            let settled = match &snapshot.job {
                JobSlot::Idle => true,
                JobSlot::Submitting => false,
                JobSlot::Tracking(job) => job.progress.is_terminal(),
            };
            if settled || self.state.is_torn_down() {
                return snapshot;
            }

            if updates.changed().await.is_err() {
                return self.state.snapshot();
            }
        }
    }

    /// Cancels both timers; responses still in flight are discarded
    ///
    /// Safe to call more than once.
    pub fn teardown(&self) {
        if self.state.is_torn_down() {
            return;
        }

        self.state.tear_down();
        let poller_stopped = self.coordinator.poller().cancel();
        let refresher_stopped = self.refresher.stop();

        debug!(poller_stopped, refresher_stopped, "Video view torn down");
    }
}

impl Drop for VideoView {
    fn drop(&mut self) {
        self.teardown();
    }
}
