//! History refresher
//!
//! Reloads the user's job list on a fixed cadence for the whole lifetime of a
//! view, independently of any job being polled. Like status probes, each
//! refresh runs as its own task so a slow response never holds back the next
//! tick; a response older than the list on screen is dropped.

use std::sync::{Arc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use crate::backend::VideoBackend;
use crate::error::PollTransientError;
use crate::state::ViewState;

/// Owns the repeating history refresh of a video view
pub struct HistoryRefresher {
    backend: Arc<dyn VideoBackend>,
    state: Arc<ViewState>,
    interval: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl HistoryRefresher {
    pub fn new(backend: Arc<dyn VideoBackend>, state: Arc<ViewState>, interval: Duration) -> Self {
        Self {
            backend,
            state,
            interval,
            handle: Mutex::new(None),
        }
    }

    /// Starts refreshing; the first refresh happens immediately
    ///
    /// Does nothing if the refresher is already running.
    pub fn start(&self) {
        let mut handle = self.handle.lock().unwrap();
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        info!("Refreshing video history every {:?}", self.interval);

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let interval = self.interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            let mut refreshes = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let backend = Arc::clone(&backend);
                        let state = Arc::clone(&state);
                        refreshes.spawn(async move { refresh_once(&*backend, &state).await });
                    }
                    Some(joined) = refreshes.join_next() => {
                        if let Err(e) = joined {
                            warn!("History refresh task failed: {}", e);
                        }
                    }
                }
            }
        }));
    }

    /// Stops refreshing
    ///
    /// Returns true if a running refresher was stopped.
    pub fn stop(&self) -> bool {
        match self.handle.lock().unwrap().take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Fetches the history once and replaces the list on success
///
/// On failure the previous list stays as it was. Returns whether the list was
/// replaced.
pub async fn refresh_once(backend: &dyn VideoBackend, state: &ViewState) -> bool {
    let request = state.begin_history_request();

    match backend.list_my_videos().await {
        Ok(entries) => {
            debug!(request, "Fetched {} history entries", entries.len());
            let replaced = state.replace_history(request, entries);
            if !replaced {
                debug!(request, "Discarded outdated history response");
            }
            replaced
        }
        Err(e) => {
            let err = PollTransientError::from(e);
            warn!("History refresh failed, keeping previous list: {}", err);
            false
        }
    }
}
