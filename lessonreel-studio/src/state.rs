//! View state surface
//!
//! The state a video view presents, split by owner. The job surface is written
//! by the submission coordinator and the status poller, the history surface by
//! the history refresher. Each part has its own lock and no lock is ever held
//! across an await.

use lessonreel_core::domain::history::HistoryEntry;
use lessonreel_core::domain::job::{Job, JobId, JobProgress, JobStatus};
use std::sync::Mutex;
use tokio::sync::watch;

use crate::scheduler::poller::ProbeOutcome;

/// Where the current job is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobSlot {
    /// No job held
    #[default]
    Idle,
    /// Creation request in flight; shown as queued
    Submitting,
    /// The service accepted the job and it is being tracked
    Tracking(Job),
}

/// The job a probe was issued for
///
/// `generation` changes with every submission, so a late answer for an older
/// submission never matches even if the service reuses an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub job_id: JobId,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct JobSurface {
    slot: JobSlot,
    generation: u64,
    last_error: Option<String>,
    torn_down: bool,
}

#[derive(Debug, Default)]
struct HistorySurface {
    entries: Vec<HistoryEntry>,
    refreshes: u64,
    /// Last request number handed out
    issued: u64,
    /// Request number of the list currently shown
    applied: u64,
}

/// Shared mutable state of one video view
#[derive(Debug)]
pub struct ViewState {
    job: Mutex<JobSurface>,
    history: Mutex<HistorySurface>,
    job_changes: watch::Sender<u64>,
    history_changes: watch::Sender<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            job: Mutex::new(JobSurface::default()),
            history: Mutex::new(HistorySurface::default()),
            job_changes: watch::channel(0).0,
            history_changes: watch::channel(0).0,
        }
    }

    /// Copies the current state for presentation
    pub fn snapshot(&self) -> ViewSnapshot {
        let (job, last_error) = {
            let surface = self.job.lock().unwrap();
            (surface.slot.clone(), surface.last_error.clone())
        };
        let (history, history_refreshes) = {
            let surface = self.history.lock().unwrap();
            (surface.entries.clone(), surface.refreshes)
        };

        ViewSnapshot {
            job,
            last_error,
            history,
            history_refreshes,
        }
    }

    /// Notified after every change to the job surface
    pub fn subscribe_job(&self) -> watch::Receiver<u64> {
        self.job_changes.subscribe()
    }

    /// Notified after every successful history refresh
    pub fn subscribe_history(&self) -> watch::Receiver<u64> {
        self.history_changes.subscribe()
    }

    pub fn is_torn_down(&self) -> bool {
        self.job.lock().unwrap().torn_down
    }

    // =============================================================================
    // Job surface writers
    // =============================================================================

    fn update_job<R>(&self, f: impl FnOnce(&mut JobSurface) -> R) -> R {
        let result = {
            let mut surface = self.job.lock().unwrap();
            f(&mut surface)
        };
        self.job_changes.send_modify(|version| *version += 1);
        result
    }

    /// Records a submission problem without touching the job itself
    pub(crate) fn record_submission_error(&self, message: String) {
        self.update_job(|surface| surface.last_error = Some(message));
    }

    /// Starts a new submission, discarding whatever job was held before
    ///
    /// Returns the generation the submission belongs to.
    pub(crate) fn begin_submission(&self) -> u64 {
        self.update_job(|surface| {
            surface.generation += 1;
            surface.slot = JobSlot::Submitting;
            surface.last_error = None;
            surface.generation
        })
    }

    /// Stores the id the service assigned and returns what the poller should probe
    ///
    /// Returns `None` when a newer submission or a teardown got there first.
    pub(crate) fn accept_submission(&self, generation: u64, job_id: JobId) -> Option<ProbeTarget> {
        self.update_job(|surface| {
            if surface.torn_down || surface.generation != generation {
                return None;
            }
            surface.slot = JobSlot::Tracking(Job::queued(job_id.clone()));
            Some(ProbeTarget { job_id, generation })
        })
    }

    /// Drops back to no job after a failed creation request
    pub(crate) fn reject_submission(&self, generation: u64, message: String) {
        self.update_job(|surface| {
            if surface.generation != generation {
                return;
            }
            surface.slot = JobSlot::Idle;
            surface.last_error = Some(message);
        })
    }

    /// Whether `target` is still the live, unfinished job of this view
    pub(crate) fn is_current(&self, target: &ProbeTarget) -> bool {
        let surface = self.job.lock().unwrap();
        let current = Self::tracks(&surface, target).is_some_and(|job| !job.progress.is_terminal());
        current
    }

    fn tracks<'a>(surface: &'a JobSurface, target: &ProbeTarget) -> Option<&'a Job> {
        if surface.torn_down || surface.generation != target.generation {
            return None;
        }
        match &surface.slot {
            JobSlot::Tracking(job) if job.id == target.job_id => Some(job),
            _ => None,
        }
    }

    /// Applies a status report to the job it was requested for
    ///
    /// Reports for a job that is no longer current, or that already reached a
    /// terminal state, are discarded.
    pub(crate) fn apply_report(&self, target: &ProbeTarget, progress: JobProgress) -> ProbeOutcome {
        let outcome = {
            let mut surface = self.job.lock().unwrap();
            let current = Self::tracks(&surface, target).is_some_and(|job| !job.progress.is_terminal());
            if !current {
                return ProbeOutcome::Stale;
            }

            let status = progress.status();
            if let JobSlot::Tracking(job) = &mut surface.slot {
                job.progress = progress;
            }
            if status.is_terminal() {
                ProbeOutcome::Terminal(status)
            } else {
                ProbeOutcome::Progressed(status)
            }
        };
        self.job_changes.send_modify(|version| *version += 1);
        outcome
    }

    /// Marks the view as gone; later responses are ignored
    pub(crate) fn tear_down(&self) {
        self.update_job(|surface| surface.torn_down = true);
    }

    // =============================================================================
    // History surface writer
    // =============================================================================

    /// Numbers a history request before it is sent
    pub(crate) fn begin_history_request(&self) -> u64 {
        let mut surface = self.history.lock().unwrap();
        surface.issued += 1;
        surface.issued
    }

    /// Replaces the whole history list with the response to `request`
    ///
    /// A response older than the list already shown is discarded.
    pub(crate) fn replace_history(&self, request: u64, entries: Vec<HistoryEntry>) -> bool {
        if self.is_torn_down() {
            return false;
        }
        {
            let mut surface = self.history.lock().unwrap();
            if request <= surface.applied {
                return false;
            }
            surface.entries = entries;
            surface.applied = request;
            surface.refreshes += 1;
        }
        self.history_changes.send_modify(|version| *version += 1);
        true
    }
}

/// Read model handed to presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub job: JobSlot,
    /// Last validation or submission error, if any
    pub last_error: Option<String>,
    pub history: Vec<HistoryEntry>,
    /// Number of successful history refreshes so far
    pub history_refreshes: u64,
}

impl ViewSnapshot {
    /// Displayed status; `None` when no job is held
    pub fn status(&self) -> Option<JobStatus> {
        match &self.job {
            JobSlot::Idle => None,
            JobSlot::Submitting => Some(JobStatus::Queued),
            JobSlot::Tracking(job) => Some(job.status()),
        }
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match &self.job {
            JobSlot::Tracking(job) => Some(&job.id),
            _ => None,
        }
    }

    pub fn result_url(&self) -> Option<&str> {
        match &self.job {
            JobSlot::Tracking(job) => job.progress.result_url(),
            _ => None,
        }
    }

    /// Failure message reported by the service for the current job
    pub fn error_message(&self) -> Option<&str> {
        match &self.job {
            JobSlot::Tracking(job) => job.progress.error_message(),
            _ => None,
        }
    }

    /// A job is in progress; a form would show a spinner
    pub fn is_busy(&self) -> bool {
        matches!(self.status(), Some(JobStatus::Queued | JobStatus::Started))
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_some_and(JobStatus::is_terminal)
    }
}
