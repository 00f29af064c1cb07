//! Job status poller
//!
//! Probes the service for the status of one submitted job on a fixed cadence
//! until the job completes or fails. Each tick spawns its probe as a separate
//! task, so a slow response never delays the schedule; answers are applied in
//! arrival order and discarded once they no longer match the armed job.

use lessonreel_core::domain::job::{JobProgress, JobStatus};
use std::sync::{Arc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::backend::VideoBackend;
use crate::error::PollTransientError;
use crate::state::{ProbeTarget, ViewState};

/// What a single probe did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Status updated; the job is still running
    Progressed(JobStatus),
    /// The job completed or failed; polling ends
    Terminal(JobStatus),
    /// The request failed; nothing changed and the next tick retries
    Skipped,
    /// The answer belongs to a job that is no longer current
    Stale,
}

/// Owns the repeating status probe of a video view
pub struct StatusPoller {
    backend: Arc<dyn VideoBackend>,
    state: Arc<ViewState>,
    interval: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl StatusPoller {
    /// Creates an idle poller
    pub fn new(backend: Arc<dyn VideoBackend>, state: Arc<ViewState>, interval: Duration) -> Self {
        Self {
            backend,
            state,
            interval,
            handle: Mutex::new(None),
        }
    }

    /// Starts probing `target`, cancelling any timer that was running
    ///
    /// The first probe fires one interval after arming.
    pub fn arm(&self, target: ProbeTarget) {
        let mut handle = self.handle.lock().unwrap();
        if let Some(previous) = handle.take() {
            previous.abort();
            debug!("Cancelled previous status timer");
        }

        info!(
            job_id = %target.job_id,
            "Polling job status every {:?}", self.interval
        );

        *handle = Some(tokio::spawn(Self::run(
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
            target,
            self.interval,
        )));
    }

    /// Stops the timer, if one is running
    ///
    /// Returns true if a timer was cancelled.
    pub fn cancel(&self) -> bool {
        match self.handle.lock().unwrap().take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// Whether the timer is still scheduled
    pub fn is_active(&self) -> bool {
        self.handle
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The timer loop
    ///
    /// Ends when a probe reports a terminal status or the target stops being
    /// current. Dropping the loop drops the probes still in flight.
    async fn run(
        backend: Arc<dyn VideoBackend>,
        state: Arc<ViewState>,
        target: ProbeTarget,
        interval: Duration,
    ) {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        let mut probes = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !state.is_current(&target) {
                        debug!(job_id = %target.job_id, "Job no longer current, stopping timer");
                        break;
                    }

                    debug!(job_id = %target.job_id, "Probing job status");
                    probes.spawn(probe(
                        Arc::clone(&backend),
                        Arc::clone(&state),
                        target.clone(),
                    ));
                }
                Some(joined) = probes.join_next() => match joined {
                    Ok(ProbeOutcome::Terminal(status)) => {
                        info!(job_id = %target.job_id, "Job {}, stopping status timer", status);
                        break;
                    }
                    Ok(ProbeOutcome::Stale) => {
                        debug!(job_id = %target.job_id, "Discarded stale status, stopping timer");
                        break;
                    }
                    Ok(ProbeOutcome::Progressed(_) | ProbeOutcome::Skipped) => {}
                    Err(e) => warn!(job_id = %target.job_id, "Status probe task failed: {}", e),
                },
            }
        }
    }
}

/// Performs one status request and applies the answer
///
/// A failed request is transient: it is logged and leaves the view untouched.
pub async fn probe(
    backend: Arc<dyn VideoBackend>,
    state: Arc<ViewState>,
    target: ProbeTarget,
) -> ProbeOutcome {
    match backend.video_status(&target.job_id).await {
        Ok(report) => {
            let outcome = state.apply_report(&target, JobProgress::from_report(report));
            debug!(job_id = %target.job_id, ?outcome, "Applied status report");
            outcome
        }
        Err(e) => {
            let err = PollTransientError::from(e);
            warn!(job_id = %target.job_id, "Status probe failed, retrying next tick: {}", err);
            ProbeOutcome::Skipped
        }
    }
}
