//! Submission coordinator
//!
//! Validates the form, sends the one job creation request and hands the
//! returned id to the status poller.

use lessonreel_core::domain::job::JobId;
use lessonreel_core::domain::submission::SubmissionForm;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::VideoBackend;
use crate::error::{GENERIC_SUBMISSION_MESSAGE, SubmitError};
use crate::scheduler::StatusPoller;
use crate::state::ViewState;

/// A creation request that has not been answered yet
///
/// If the submitting future is dropped before the service answers, the view
/// falls back to no job instead of showing a request that never finished.
struct PendingSubmission<'a> {
    state: &'a ViewState,
    generation: u64,
    settled: bool,
}

impl<'a> PendingSubmission<'a> {
    fn begin(state: &'a ViewState) -> Self {
        Self {
            generation: state.begin_submission(),
            state,
            settled: false,
        }
    }

    fn settle(mut self) -> u64 {
        self.settled = true;
        self.generation
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Submission abandoned before the service answered");
            self.state
                .reject_submission(self.generation, GENERIC_SUBMISSION_MESSAGE.to_string());
        }
    }
}

pub struct SubmissionCoordinator {
    backend: Arc<dyn VideoBackend>,
    state: Arc<ViewState>,
    poller: StatusPoller,
}

impl SubmissionCoordinator {
    pub fn new(backend: Arc<dyn VideoBackend>, state: Arc<ViewState>, poller: StatusPoller) -> Self {
        Self {
            backend,
            state,
            poller,
        }
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    /// Submits a new job
    ///
    /// An invalid form is rejected without any request. Otherwise the previous
    /// job is discarded, its timer cancelled, and exactly one creation request
    /// is sent. Resubmitting is allowed at any time; nothing is deduplicated.
    pub async fn submit(&self, form: SubmissionForm) -> Result<JobId, SubmitError> {
        let input = match form.into_input() {
            Ok(input) => input,
            Err(e) => {
                debug!("Rejected submission: {}", e);
                self.state.record_submission_error(e.to_string());
                return Err(e.into());
            }
        };

        self.poller.cancel();
        let pending = PendingSubmission::begin(&self.state);

        let created = self.backend.create_job(&input).await;
        let generation = pending.settle();

        match created {
            Ok(job_id) => {
                info!(job_id = %job_id, "Job submitted");
                match self.state.accept_submission(generation, job_id.clone()) {
                    Some(target) => self.poller.arm(target),
                    None => debug!(job_id = %job_id, "Submission superseded, not polling"),
                }
                Ok(job_id)
            }
            Err(e) => {
                warn!("Job submission failed: {}", e);
                let err = SubmitError::from_client(&e);
                self.state.reject_submission(generation, err.to_string());
                Err(err)
            }
        }
    }
}
