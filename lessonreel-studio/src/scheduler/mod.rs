//! Background timers of a video view
//!
//! Two independent repeating timers: the status poller follows one submitted
//! job until it finishes, and the history refresher keeps the job list current
//! for as long as the view is mounted. Each is held as a cancellable task
//! handle next to the state it writes.

pub mod history;
pub mod poller;

pub use history::HistoryRefresher;
pub use poller::{ProbeOutcome, StatusPoller};
