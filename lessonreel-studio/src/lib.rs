//! LessonReel Studio
//!
//! The engine behind the video generation view: it submits a long-running
//! job, polls its status until it completes or fails, and keeps the user's
//! job history fresh on an independent timer.
//!
//! Architecture:
//! - Backend: the three requests the engine needs, behind a trait
//! - State: the view's state surface, partitioned by writer
//! - Submission: validation and the one-shot creation request
//! - Scheduler: the status poller and the history refresher timers
//! - View: mount/teardown lifecycle tying it all together

pub mod backend;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod state;
pub mod submission;
pub mod view;

#[cfg(test)]
mod testing;

pub use backend::VideoBackend;
pub use config::StudioConfig;
pub use error::{PollTransientError, SubmitError};
pub use state::{JobSlot, ViewSnapshot, ViewState};
pub use view::VideoView;
