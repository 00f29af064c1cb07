//! Engine error types
//!
//! Only submission problems reach the caller. Probe failures are absorbed by
//! the background timers, and a job that fails remotely is ordinary job data.

use lessonreel_client::ClientError;
use lessonreel_core::domain::submission::ValidationError;
use thiserror::Error;

/// Message used when the service rejects a submission without explanation
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Failed to start generation";

/// Reported synchronously to whoever started a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Nothing to submit; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The job creation request failed
    #[error("{message}")]
    Submission {
        /// HTTP status, when the service answered at all
        status: Option<u16>,
        message: String,
    },
}

impl SubmitError {
    /// Builds a submission error, preferring the service's own explanation
    pub fn from_client(err: &ClientError) -> Self {
        Self::Submission {
            status: err.status(),
            message: err
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_SUBMISSION_MESSAGE.to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A status or history probe that failed at the transport or HTTP level
///
/// Logged and dropped; the next tick tries again.
#[derive(Debug, Error)]
#[error("transient probe failure: {0}")]
pub struct PollTransientError(#[from] pub ClientError);
